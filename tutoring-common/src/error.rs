//! Common error types for the tutoring ledger

use thiserror::Error;

/// Common result type for tutoring ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, the ledger and the request layer
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing field in a create request (client error, no retry)
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Referenced identifier does not exist (client error, no retry)
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Store failure; nothing partial is committed, so the whole operation may be retried
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    /// Whether the caller may safely retry the failed operation
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
