//! Error types for the fuzzy-predicate crate.

use thiserror::Error;

/// Errors that can occur when building a predicate.
///
/// Matching itself never fails: every candidate shape has a defined answer.
#[derive(Debug, Error)]
pub enum PredicateError {
    /// The query is missing, NaN, or not a string or number.
    #[error("the query is required and must be a string or number, found {found}")]
    InvalidQuery { found: &'static str },

    /// The key restriction is neither a string, a list of strings, nor a threshold.
    #[error("keys should either be a list of strings or a single string, found {found}")]
    InvalidKeys { found: &'static str },

    /// A YAML match configuration could not be parsed.
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON match configuration could not be parsed.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for predicate construction.
pub type Result<T> = std::result::Result<T, PredicateError>;
