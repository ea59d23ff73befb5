//! Error types for crossdiff.

use thiserror::Error;

/// Errors raised while configuring or running a comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiffError {
    /// A unit was compared against a counterpart that does not exist.
    #[error("Invalid argument: {context}")]
    InvalidArgument { context: String },

    /// Options failed validation.
    #[error("Invalid configuration for '{field}': {message}")]
    Config { field: String, message: String },
}

impl DiffError {
    pub(crate) fn config(field: &str, message: impl Into<String>) -> Self {
        DiffError::Config {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiffError>;
