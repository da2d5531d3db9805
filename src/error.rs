//! Error types for tree construction.

use thiserror::Error;

/// Errors from validating a [`TreeConfig`](crate::TreeConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A threshold of zero would collapse nodes before they have any children.
    #[error("max_children must be at least 1")]
    ZeroMaxChildren,

    /// The placeholder must be a usable child key.
    #[error("placeholder must not be empty")]
    EmptyPlaceholder,

    /// A placeholder containing the delimiter could never be produced by the
    /// tokenizer and would render ambiguous paths.
    #[error("placeholder {placeholder:?} contains the delimiter {delimiter:?}")]
    PlaceholderContainsDelimiter { placeholder: String, delimiter: char },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
