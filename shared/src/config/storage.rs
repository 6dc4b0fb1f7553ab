//! Key storage configuration module

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which key store backend to try at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// SQLite file, degrading to memory when the file cannot be opened
    #[default]
    Sqlite,
    /// In-memory only; keys are lost on restart
    Memory,
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "persistent" => Ok(StorageMode::Sqlite),
            "memory" | "fallback" => Ok(StorageMode::Memory),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}

/// Key storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Backend to probe at startup
    #[serde(default)]
    pub mode: StorageMode,

    /// Path of the SQLite database file
    pub path: PathBuf,

    /// Wipe and reinitialize the store when the service starts
    #[serde(default)]
    pub recreate_on_startup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::Sqlite,
            path: PathBuf::from("jwks_keys.db"),
            recreate_on_startup: false,
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            mode: std::env::var("STORAGE_MODE")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(defaults.mode),
            path: std::env::var("STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            recreate_on_startup: std::env::var("STORAGE_RECREATE_ON_STARTUP")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.recreate_on_startup),
        }
    }

    /// Create a SQLite configuration for the given file
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create an in-memory configuration
    pub fn memory() -> Self {
        Self {
            mode: StorageMode::Memory,
            ..Default::default()
        }
    }

    /// Recreate the store at startup
    pub fn with_recreate_on_startup(mut self, recreate: bool) -> Self {
        self.recreate_on_startup = recreate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_mode_parsing() {
        assert_eq!("SQLite".parse::<StorageMode>().unwrap(), StorageMode::Sqlite);
        assert_eq!("fallback".parse::<StorageMode>().unwrap(), StorageMode::Memory);
        assert!("redis".parse::<StorageMode>().is_err());
    }

    #[test]
    fn test_builders() {
        let config = StorageConfig::sqlite("/tmp/keys.db").with_recreate_on_startup(true);
        assert_eq!(config.mode, StorageMode::Sqlite);
        assert_eq!(config.path, PathBuf::from("/tmp/keys.db"));
        assert!(config.recreate_on_startup);

        assert_eq!(StorageConfig::memory().mode, StorageMode::Memory);
    }
}
