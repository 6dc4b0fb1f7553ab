//! Shared configuration and common types for the JWKS server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The error response body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, ExpiredKeyPolicy, KeyConfig, KidStrategy, LogFormat, LoggingConfig,
    ServerConfig, StorageConfig, StorageMode,
};
pub use errors::{error_codes, ErrorResponse};
