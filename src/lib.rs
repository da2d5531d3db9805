//! Hit counters over hierarchical paths with automatic template detection.
//!
//! A [`HitsTree`] stores one counter and one tag set per path component
//! sequence. Once a node reaches its configured number of children, the next
//! unseen component folds all siblings into a single placeholder branch, so
//! high-cardinality path spaces such as `/users/123/posts/456` shrink to a
//! bounded summary like `/users/{}/posts/{}`.
//!
//! ```rust
//! use hits_tree::{HitsTree, TreeConfig};
//!
//! let mut tree = HitsTree::with_config(TreeConfig::default().with_max_children(2)).unwrap();
//! tree.hit("/users/1");
//! tree.hit("/users/2");
//! tree.add_hits("/users/3", 5, ["slow"]);
//!
//! assert_eq!(tree.hits_at("/users/{}"), 7);
//! assert_eq!(tree.to_string(), "7\t/users/{}\tslow");
//! ```

mod config;
mod error;
mod hits_tree;
pub mod path;
mod report;
mod tree;
mod util;

#[cfg(test)]
mod proptests;

pub use config::{DEFAULT_DELIMITER, DEFAULT_MAX_CHILDREN, DEFAULT_PLACEHOLDER, TreeConfig};
pub use error::{ConfigError, Result};
pub use hits_tree::HitsTree;
pub use report::{HitsReport, ReportEntry};
