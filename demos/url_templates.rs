//! Feeds synthetic user traffic through a tree with a low threshold and prints
//! the templated summary.

use hits_tree::{HitsTree, TreeConfig};

fn main() {
    let config = TreeConfig::default().with_max_children(10);
    let mut tree = HitsTree::with_config(config).expect("valid config");

    tree.hit("/");
    tree.hit("/users");
    tree.hit("/content/foo");
    tree.hit("/content/bar");
    tree.add_hits("/content/baz", 10, ["tag1"]);
    tree.hit("/content/baz");
    tree.add_hits("/content/baz", 1, ["tag2"]);

    for i in 0..200 {
        if i % 10 != 0 {
            tree.hit(&format!("/users/{i}/posts"));
        } else {
            for j in 0..20 {
                tree.hit(&format!("/users/{i}/posts/{j}"));
            }
        }
    }
    tree.hit("/users/0000/posts");
    tree.hit("/users/1234");
    tree.hit("/users/5678");

    println!("{tree}");
}
