//! Per-tree configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default number of children a node may hold before they collapse.
pub const DEFAULT_MAX_CHILDREN: usize = 100;
/// Default component used for collapsed (templated) branches.
pub const DEFAULT_PLACEHOLDER: &str = "{}";
/// Default path delimiter.
pub const DEFAULT_DELIMITER: char = '/';

/// Settings fixed for the lifetime of a [`HitsTree`](crate::HitsTree).
///
/// Deserializes with defaults for missing fields, so `{}` is a valid
/// configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Child count at which a node's children collapse into the placeholder.
    pub max_children: usize,
    /// Key of the collapsed branch.
    pub placeholder: String,
    /// Separator between path components.
    pub delimiter: char,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl TreeConfig {
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Checks that the settings describe a usable tree.
    ///
    /// A zero threshold is rejected rather than interpreted: collapsing a
    /// node with no children has no survivor to route into.
    pub fn validate(&self) -> Result<()> {
        if self.max_children == 0 {
            return Err(ConfigError::ZeroMaxChildren);
        }
        if self.placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        if self.placeholder.contains(self.delimiter) {
            return Err(ConfigError::PlaceholderContainsDelimiter {
                placeholder: self.placeholder.clone(),
                delimiter: self.delimiter,
            });
        }
        Ok(())
    }
}
