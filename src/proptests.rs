use crate::{HitsTree, TreeConfig, path, tree};

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
struct Record {
    path: String,
    hits: u64,
    tags: Vec<String>,
}

fn path_strategy() -> impl Strategy<Value = String> {
    let component = prop_oneof![
        8 => "[a-e]",
        1 => Just(String::new()),
        1 => Just(".".to_owned()),
    ];
    proptest::collection::vec(component, 0..5).prop_map(|parts| format!("/{}", parts.join("/")))
}

fn root_alias_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![Just(""), Just("."), Just("..")];
    proptest::collection::vec(segment, 0..6).prop_map(|parts| parts.join("/"))
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        path_strategy(),
        0u64..20,
        proptest::collection::vec("t[0-3]", 0..3),
    )
        .prop_map(|(path, hits, tags)| Record { path, hits, tags })
}

fn records_strategy() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(record_strategy(), 0..60)
}

fn build(records: &[Record], config: &TreeConfig) -> HitsTree {
    let mut tree = HitsTree::with_config(config.clone()).unwrap();
    for record in records {
        tree.add_hits(&record.path, record.hits, record.tags.iter().cloned());
    }
    tree
}

fn canonical(raw: &str) -> String {
    path::join(&path::tokenize(raw, '/'), '/')
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_hits_match_model_without_collapse(records in records_strategy()) {
        let tree = build(&records, &TreeConfig::default());
        let mut model: BTreeMap<String, u64> = BTreeMap::new();
        for record in &records {
            if record.hits > 0 {
                *model.entry(canonical(&record.path)).or_default() += record.hits;
            }
        }
        prop_assert_eq!(tree.hits_map(), model);
    }

    #[test]
    fn prop_tags_are_union_of_inputs(records in records_strategy()) {
        let tree = build(&records, &TreeConfig::default());
        let mut model: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in &records {
            if !record.tags.is_empty() {
                model
                    .entry(canonical(&record.path))
                    .or_default()
                    .extend(record.tags.iter().cloned());
            }
        }
        prop_assert_eq!(tree.tags_map(), model);
    }

    #[test]
    fn prop_merge_conserves_counts(left in records_strategy(), right in records_strategy()) {
        let config = TreeConfig::default();
        let a = build(&left, &config);
        let b = build(&right, &config);
        let (a_map, b_map) = (a.hits_map(), b.hits_map());

        let mut merged = a.clone();
        merged.merge(b);
        let merged_map = merged.hits_map();

        let paths: BTreeSet<&String> = a_map.keys().chain(b_map.keys()).collect();
        prop_assert_eq!(merged_map.len(), paths.len());
        for path in paths {
            let expected = a_map.get(path).copied().unwrap_or(0) + b_map.get(path).copied().unwrap_or(0);
            prop_assert_eq!(merged_map[path], expected);
        }
    }

    #[test]
    fn prop_merge_matches_single_pass(left in records_strategy(), right in records_strategy()) {
        let config = TreeConfig::default();
        let mut merged = build(&left, &config);
        merged.merge(build(&right, &config));
        let combined: Vec<Record> = left.into_iter().chain(right).collect();
        let single = build(&combined, &config);
        prop_assert_eq!(merged.hits_map(), single.hits_map());
        prop_assert_eq!(merged.tags_map(), single.tags_map());
    }

    #[test]
    fn prop_collapse_is_loss_free(records in records_strategy(), max_children in 1usize..4) {
        let tree = build(&records, &TreeConfig::default().with_max_children(max_children));
        let total: u64 = records.iter().map(|r| r.hits).sum();
        prop_assert_eq!(tree.total_hits(), total);
        prop_assert_eq!(tree.hits_map().values().sum::<u64>(), total);

        let seen: BTreeSet<String> = tree.tags_map().into_values().flatten().collect();
        let given: BTreeSet<String> = records.iter().flat_map(|r| r.tags.iter().cloned()).collect();
        prop_assert_eq!(seen, given);
    }

    #[test]
    fn prop_children_bounded_by_threshold(records in records_strategy(), max_children in 1usize..4) {
        let built = build(&records, &TreeConfig::default().with_max_children(max_children));
        fn check(node: &tree::Node, max: usize) -> bool {
            let templated = node.children.contains_key("{}");
            let bounded = if templated { node.children.len() == 1 } else { node.children.len() <= max };
            bounded && node.children.values().all(|child| check(child, max))
        }
        prop_assert!(check(built.root_for_test(), max_children));
    }

    #[test]
    fn prop_root_aliases(raw in root_alias_strategy()) {
        let mut tree = HitsTree::new();
        tree.hit(&raw);
        prop_assert_eq!(tree.hits_at("/"), 1);
        prop_assert_eq!(tree.node_count(), 1);
    }
}
