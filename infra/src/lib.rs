//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the JWKS server.
//! It provides the concrete key store implementations behind the
//! `jwks_core::repositories::KeyStore` contract.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: SQLite key store using SQLx
//! - **Backend**: runtime selection between the SQLite store and the
//!   in-memory fallback

// Re-export core types for convenience
pub use jwks_core::errors::*;

/// Database module - SQLite implementations using SQLx
pub mod database;

/// Key store backend selected at startup
pub mod backend;

pub use backend::KeyStoreBackend;
pub use database::SqliteKeyStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error on the database file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record that cannot be turned back into a key
    #[error("Corrupt key record: {0}")]
    CorruptRecord(String),

    /// Connection dropped by a recreate that did not complete
    #[error("Key database is closed after a failed recreate")]
    Closed,
}

/// Failures of an already selected backend are operation failures; backend
/// unavailability is only decided by the startup probe in `KeyStoreBackend`.
impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::StoreOperationFailed {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_failures_are_operation_failures() {
        let errors = [
            InfrastructureError::Database(sqlx::Error::PoolTimedOut),
            InfrastructureError::Database(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "disk gone",
            ))),
            InfrastructureError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)),
            InfrastructureError::CorruptRecord("key 3".to_string()),
            InfrastructureError::Closed,
        ];

        for error in errors {
            let message = error.to_string();
            match DomainError::from(error) {
                DomainError::StoreOperationFailed { message: mapped } => assert_eq!(mapped, message),
                other => panic!("unexpected mapping: {:?}", other),
            }
        }
    }
}
