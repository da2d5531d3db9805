//! Builds trees on separate shards, then merges them without replaying the
//! original stream.

use hits_tree::HitsTree;

fn main() {
    // Shard A ingests even IDs, shard B odd ones. Both use the default
    // placeholder, which merging requires.
    let mut shard_a = HitsTree::new();
    let mut shard_b = HitsTree::new();

    for id in 0..10_000 {
        let path = format!("/tenant/{}/event", id % 128);
        if id % 2 == 0 {
            shard_a.add_hits(&path, 1, ["shard-a"]);
        } else {
            shard_b.add_hits(&path, 1, ["shard-b"]);
        }
    }

    // 128 tenants exceed the default threshold of 100, so both shards
    // already report the tenant level as a template.
    let mut aggregate = shard_a.clone();
    aggregate.merge(shard_b.clone());

    println!(
        "Templated tenant events: {}",
        aggregate.hits_at("/tenant/7/event")
    );
    println!("Nodes materialized: {}", aggregate.node_count());
    if let Some(tags) = aggregate.tags_at("/tenant/{}/event") {
        println!("Tags: {tags:?}");
    }

    // Merging is associative, so an empty tree can rebuild the aggregate.
    let mut rebuilt = HitsTree::new();
    rebuilt.merge(shard_a);
    rebuilt.merge(shard_b);
    println!(
        "Rebuilt matches aggregate? {}",
        rebuilt.hits_map() == aggregate.hits_map()
    );
}
