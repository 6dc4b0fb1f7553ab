//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Core domain errors
///
/// `NotFound` and `InvalidInput` are expected outcomes the caller is meant to
/// handle. Store and token failures end the current operation and are surfaced
/// to the service boundary as request failures.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Key store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Key store operation failed: {message}")]
    StoreOperationFailed { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for a not-found key identifier
    pub fn key_not_found(kid: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            resource: format!("key {}", kid),
        }
    }

    /// Whether this is an expected, caller-recoverable condition
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::NotFound { .. } | DomainError::InvalidInput { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
