//! Read-only projections of a tree: hit and tag maps plus the sorted report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::{Node, visit_paths};

pub(crate) fn collect_hits(root: &Node, delimiter: char) -> BTreeMap<String, u64> {
    let mut out = BTreeMap::new();
    let mut path = String::from(delimiter);
    visit_paths(root, &mut path, delimiter, &mut |path, node| {
        if node.hits > 0 {
            let slot = out.entry(path.to_owned()).or_insert(0u64);
            *slot = slot.saturating_add(node.hits);
        }
    });
    out
}

pub(crate) fn collect_tags(root: &Node, delimiter: char) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut path = String::from(delimiter);
    visit_paths(root, &mut path, delimiter, &mut |path, node| {
        if !node.tags.is_empty() {
            out.entry(path.to_owned())
                .or_default()
                .extend(node.tags.iter().cloned());
        }
    });
    out
}

/// One line of a [`HitsReport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Rooted path rebuilt from the tree, e.g. `/users/{}/posts`.
    pub path: String,
    /// Hits recorded at exactly this path, not including descendants.
    pub hits: u64,
    /// Sorted tags recorded at exactly this path.
    pub tags: Vec<String>,
}

/// Every path with at least one hit, sorted lexicographically.
///
/// Renders as tab-separated lines: `hits`, `path`, then comma-joined tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitsReport {
    pub entries: Vec<ReportEntry>,
}

impl HitsReport {
    pub(crate) fn build(root: &Node, delimiter: char) -> Self {
        let hits = collect_hits(root, delimiter);
        let mut tags = collect_tags(root, delimiter);
        let entries = hits
            .into_iter()
            .map(|(path, hits)| {
                let tags = tags
                    .remove(&path)
                    .map(|set| set.into_iter().collect())
                    .unwrap_or_default();
                ReportEntry { path, hits, tags }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.hits, self.path, self.tags.join(","))
    }
}

impl fmt::Display for HitsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
