use hits_tree::HitsTree;

fn main() {
    let mut tree = HitsTree::new();

    let requests = [
        ("/api/v1/users", 1),
        ("/api/v1/orders", 1),
        ("/api/v1/users/", 1),
        ("/api/v2/users", 3),
        ("/static//css/../css", 1),
    ];

    for (path, hits) in requests {
        tree.add_hits(path, hits, std::iter::empty::<String>());
    }

    println!("Total traffic: {}", tree.total_hits());
    println!("/api/v1/users hits: {}", tree.hits_at("/api/v1/users"));

    let mut other = HitsTree::new();
    other.add_hits("/api/v1/reports", 5, ["batch"]);
    tree.merge(other);

    println!("After merge:\n{tree}");
}
