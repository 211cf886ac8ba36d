//! Error types for the user-agent engine.
//!
//! Classification itself never fails. Every variant here describes a defect
//! in a rule table, detected while the table is being built.

use thiserror::Error;

/// Result type for rule-table operations.
pub type Result<T> = std::result::Result<T, UaError>;

/// Errors that can occur while loading or compiling a rule table.
#[derive(Debug, Error)]
pub enum UaError {
    /// Rule document could not be parsed.
    #[error("Failed to parse rule table: {0}")]
    ParseError(String),

    /// Rule table validation failed.
    #[error("Rule table validation error: {0}")]
    ValidationError(String),

    /// A rule pattern is not a valid regular expression.
    #[error("Invalid pattern for '{category}': {message}")]
    InvalidPattern { category: String, message: String },

    /// An expandable rule whose template does not fit its pattern.
    #[error(
        "Template for '{category}' has {placeholders} placeholder(s) but its pattern captures {captures} group(s)"
    )]
    TemplateMismatch {
        category: String,
        placeholders: usize,
        captures: usize,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl UaError {
    pub(crate) fn invalid_pattern(category: &str, err: regex::Error) -> Self {
        UaError::InvalidPattern {
            category: category.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for UaError {
    fn from(err: serde_json::Error) -> Self {
        UaError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for UaError {
    fn from(err: serde_yaml::Error) -> Self {
        UaError::ParseError(err.to_string())
    }
}
