use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::mem;

use crate::config::TreeConfig;
use crate::util::DeterministicState;

pub(crate) type Children = HashMap<String, Node, DeterministicState>;

// Paths can be arbitrarily deep, so nothing below recurses per level: every
// walk over a subtree keeps its own work stack.
#[derive(Default)]
pub(crate) struct Node {
    pub(crate) hits: u64,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) children: Children,
}

impl Node {
    fn shallow_clone(&self) -> Node {
        Node {
            hits: self.hits,
            tags: self.tags.clone(),
            children: Children::default(),
        }
    }

    /// Unions `other` into `self`, taking ownership of its subtree.
    ///
    /// Children missing from `self` are moved over as-is; shared keys merge
    /// level by level.
    pub(crate) fn merge(&mut self, other: Node) {
        let mut stack: Vec<(&mut Node, Node)> = vec![(self, other)];
        while let Some((target, mut source)) = stack.pop() {
            target.hits = target.hits.saturating_add(source.hits);
            if target.tags.is_empty() {
                target.tags = mem::take(&mut source.tags);
            } else {
                target.tags.append(&mut source.tags);
            }

            let mut shared = Children::default();
            for (key, child) in source.children.drain() {
                if target.children.contains_key(&key) {
                    shared.insert(key, child);
                } else {
                    target.children.insert(key, child);
                }
            }
            if shared.is_empty() {
                continue;
            }
            for (key, child) in target.children.iter_mut() {
                if let Some(incoming) = shared.remove(key) {
                    stack.push((child, incoming));
                }
            }
        }
    }

    pub(crate) fn record(&mut self, hits: u64, tags: impl IntoIterator<Item = String>) {
        self.hits = self.hits.saturating_add(hits);
        self.tags.extend(tags);
    }

    pub(crate) fn count_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    pub(crate) fn sum_hits(&self) -> u64 {
        let mut total = 0u64;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total = total.saturating_add(node.hits);
            stack.extend(node.children.values());
        }
        total
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let mut root = self.shallow_clone();
        let mut stack: Vec<(&Node, &mut Node)> = vec![(self, &mut root)];
        while let Some((src, dst)) = stack.pop() {
            dst.children.reserve(src.children.len());
            for (key, child) in &src.children {
                dst.children.insert(key.clone(), child.shallow_clone());
            }
            for (key, child) in dst.children.iter_mut() {
                if let Some(original) = src.children.get(key) {
                    stack.push((original, child));
                }
            }
        }
        root
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack: Vec<Node> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("hits", &self.hits)
            .field("tags", &self.tags)
            .field("children", &self.children.len())
            .finish()
    }
}

/// Folds every child of `node` into one survivor registered under
/// `placeholder`. Returns `None`, leaving `node` untouched, when there is
/// nothing to fold.
pub(crate) fn collapse_children<'a>(
    node: &'a mut Node,
    placeholder: &str,
) -> Option<&'a mut Node> {
    let mut survivor: Option<Node> = None;
    for (_, child) in node.children.drain() {
        match survivor.as_mut() {
            Some(acc) => acc.merge(child),
            None => survivor = Some(child),
        }
    }
    let survivor = survivor?;
    Some(node.children.entry(placeholder.to_owned()).or_insert(survivor))
}

/// Routes one step down from `node` for `component`, creating or collapsing
/// children as required.
pub(crate) fn descend<'a>(
    node: &'a mut Node,
    component: &str,
    depth: usize,
    config: &TreeConfig,
) -> &'a mut Node {
    let placeholder = config.placeholder.as_str();
    let key = if node.children.contains_key(placeholder) {
        placeholder
    } else if node.children.contains_key(component) {
        component
    } else if !node.children.is_empty() && node.children.len() >= config.max_children {
        tracing::debug!(
            depth,
            component,
            absorbed = node.children.len(),
            "collapsing children into placeholder"
        );
        collapse_children(node, placeholder);
        placeholder
    } else {
        component
    };
    node.children.entry(key.to_owned()).or_default()
}

pub(crate) fn add_hits_inner<S: AsRef<str>>(
    root: &mut Node,
    components: &[S],
    hits: u64,
    tags: impl IntoIterator<Item = String>,
    config: &TreeConfig,
) {
    let mut node = root;
    for (depth, component) in components.iter().enumerate() {
        node = descend(node, component.as_ref(), depth, config);
    }
    node.record(hits, tags);
}

/// Finds the node stored under `components`.
///
/// An exact child wins; otherwise the walk falls back to the placeholder
/// child, so templated paths resolve the way insertion routed them. The two
/// only differ after a merge leaves literal keys next to a placeholder.
pub(crate) fn locate_node<'a, S: AsRef<str>>(
    root: &'a Node,
    components: &[S],
    placeholder: &str,
) -> Option<&'a Node> {
    let mut node = root;
    for component in components {
        node = node
            .children
            .get(component.as_ref())
            .or_else(|| node.children.get(placeholder))?;
    }
    Some(node)
}

/// Visits every node together with its reconstructed path.
pub(crate) fn visit_paths<F>(root: &Node, path: &mut String, delimiter: char, f: &mut F)
where
    F: FnMut(&str, &Node),
{
    f(path, root);
    let root_len = path.len();
    let mut stack: Vec<(usize, &str, &Node)> = root
        .children
        .iter()
        .map(|(key, child)| (root_len, key.as_str(), child))
        .collect();
    while let Some((parent_len, key, node)) = stack.pop() {
        path.truncate(parent_len);
        crate::path::push_component(path, key, delimiter);
        f(path, node);
        let len = path.len();
        stack.extend(
            node.children
                .iter()
                .map(|(key, child)| (len, key.as_str(), child)),
        );
    }
    path.truncate(root_len);
}
