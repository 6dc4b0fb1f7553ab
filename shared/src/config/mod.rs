//! Configuration module with service-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `keys` - Signing key generation, token lifetime and expiry policy
//! - `server` - HTTP server configuration
//! - `storage` - Key store backend selection

pub mod environment;
pub mod keys;
pub mod server;
pub mod storage;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use keys::{ExpiredKeyPolicy, KeyConfig, KidStrategy};
pub use server::ServerConfig;
pub use storage::{StorageConfig, StorageMode};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Key storage configuration
    pub storage: StorageConfig,

    /// Signing key configuration
    pub keys: KeyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            storage: StorageConfig::from_env(),
            keys: KeyConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
