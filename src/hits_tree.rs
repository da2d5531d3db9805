//! Hit-counting tree over hierarchical paths with template detection.
//!
//! Every hit walks the tree one path component at a time. When a node already
//! holds [`max_children`](TreeConfig::max_children) children and a new,
//! unseen component arrives, all existing children are merged into a single
//! placeholder child (`{}` by default). From then on every component at that
//! level routes into the placeholder, so `/users/1/posts` and
//! `/users/2/posts` both end up under `/users/{}/posts`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::TreeConfig;
use crate::error::Result;
use crate::path::clean;
use crate::report::{HitsReport, collect_hits, collect_tags};
use crate::tree::{Node, add_hits_inner, locate_node};

/// Hit counters over a set of hierarchical paths.
///
/// The tree is not synchronized; wrap it in a lock or shard it by prefix to
/// share it across threads. Independently built trees combine with
/// [`merge`](Self::merge) as long as they share the same placeholder.
#[derive(Clone, Debug)]
pub struct HitsTree {
    config: TreeConfig,
    root: Node,
}

impl Default for HitsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HitsTree {
    /// Creates an empty tree with the default configuration.
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
            root: Node::default(),
        }
    }

    /// Creates an empty tree with explicit settings.
    ///
    /// Fails when the settings do not pass [`TreeConfig::validate`].
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            root: Node::default(),
        })
    }

    /// Returns the settings this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Records one hit for `path`.
    pub fn hit(&mut self, path: &str) {
        self.add_hits(path, 1, std::iter::empty::<String>());
    }

    /// Records `hits` hits for `path` and attaches `tags` to it.
    ///
    /// The path is cleaned first, so `"/a//b/../c/"` counts towards `/a/c`
    /// and `""`, `"/"` and `"///"` all count towards the root.
    pub fn add_hits<I, T>(&mut self, path: &str, hits: u64, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let components = clean(path, self.config.delimiter);
        add_hits_inner(
            &mut self.root,
            &components,
            hits,
            tags.into_iter().map(Into::into),
            &self.config,
        );
    }

    /// Records one hit for an already split path.
    pub fn hit_components<S: AsRef<str>>(&mut self, components: &[S]) {
        self.add_hits_components(components, 1, std::iter::empty::<String>());
    }

    /// Like [`add_hits`](Self::add_hits) for an already split path.
    ///
    /// Components are used verbatim; no cleaning is applied.
    pub fn add_hits_components<S, I, T>(&mut self, components: &[S], hits: u64, tags: I)
    where
        S: AsRef<str>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        add_hits_inner(
            &mut self.root,
            components,
            hits,
            tags.into_iter().map(Into::into),
            &self.config,
        );
    }

    /// Moves every hit and tag of `other` into `self`.
    ///
    /// Counts add up and tag sets union. Merging is not idempotent: merging
    /// the same data twice counts it twice. The collapse threshold is not
    /// re-applied; it only governs insertion.
    ///
    /// # Panics
    ///
    /// Panics if the two trees use different placeholders.
    pub fn merge(&mut self, other: HitsTree) {
        assert_eq!(
            self.config.placeholder, other.config.placeholder,
            "placeholder mismatch"
        );
        tracing::trace!(
            incoming_nodes = other.root.count_nodes(),
            "merging hits tree"
        );
        self.root.merge(other.root);
    }

    /// Returns hit counts keyed by path, for every path with at least one hit.
    pub fn hits_map(&self) -> BTreeMap<String, u64> {
        collect_hits(&self.root, self.config.delimiter)
    }

    /// Returns tag sets keyed by path, for every path with at least one tag.
    pub fn tags_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        collect_tags(&self.root, self.config.delimiter)
    }

    /// Returns the sorted report rendered by `Display`.
    pub fn report(&self) -> HitsReport {
        HitsReport::build(&self.root, self.config.delimiter)
    }

    /// Returns the hits recorded at exactly `path`.
    ///
    /// A literal component resolves to its own node when one exists and
    /// falls back to the placeholder otherwise, so `"/users/42"` finds
    /// `"/users/{}"` once that level has collapsed.
    pub fn hits_at(&self, path: &str) -> u64 {
        self.find(path).map_or(0, |node| node.hits)
    }

    /// Returns the tags recorded at exactly `path`, if any node exists there.
    /// Resolves components like [`hits_at`](Self::hits_at).
    pub fn tags_at(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.find(path).map(|node| &node.tags)
    }

    /// Returns whether `path` resolves to an existing node.
    pub fn contains_path(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Sum of hits over the whole tree.
    pub fn total_hits(&self) -> u64 {
        self.root.sum_hits()
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Removes all data, keeping the configuration.
    pub fn clear(&mut self) {
        self.root = Node::default();
    }

    #[cfg(test)]
    pub(crate) fn root_for_test(&self) -> &Node {
        &self.root
    }

    fn find(&self, path: &str) -> Option<&Node> {
        let components = clean(path, self.config.delimiter);
        locate_node(&self.root, &components, &self.config.placeholder)
    }
}

impl fmt::Display for HitsTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.report(), f)
    }
}
