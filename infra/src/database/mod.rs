//! Database module - SQLite implementations using SQLx
//!
//! This module provides:
//! - Connection setup and schema creation for the key database
//! - The SQLite implementation of the key store

pub mod connection;
pub mod sqlite;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::SqliteConnector;
pub use sqlite::SqliteKeyStore;
