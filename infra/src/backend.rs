//! Key store backend selected at startup
//!
//! [`KeyStoreBackend`] wraps the available key store implementations so the
//! service can choose one at runtime while keeping static dispatch.
//!
//! | Variant | Mode |
//! |---------|------|
//! | [`KeyStoreBackend::Sqlite`] | persistent, keys survive restarts |
//! | [`KeyStoreBackend::Memory`] | fallback, keys are lost on restart |

use async_trait::async_trait;

use jwks_core::domain::entities::ExpirableKey;
use jwks_core::domain::value_objects::KeyId;
use jwks_core::errors::DomainError;
use jwks_core::repositories::{KeyStore, MemoryKeyStore};
use jwks_shared::config::{StorageConfig, StorageMode};

use crate::database::SqliteKeyStore;

/// Unified key store backend enum
pub enum KeyStoreBackend {
    /// SQLite file store
    Sqlite(SqliteKeyStore),
    /// In-memory fallback store
    Memory(MemoryKeyStore),
}

impl KeyStoreBackend {
    /// Select and initialize the key store described by `config`
    ///
    /// The SQLite store is probed once. If it cannot be opened the service
    /// keeps running on the in-memory store, and the degradation is logged
    /// as an error. This never fails.
    pub async fn connect(config: &StorageConfig) -> Self {
        let backend = match config.mode {
            StorageMode::Memory => {
                tracing::info!("Using in-memory key store; keys will not survive a restart");
                Self::memory()
            }
            StorageMode::Sqlite => match SqliteKeyStore::open(&config.path).await {
                Ok(store) => Self::Sqlite(store),
                Err(e) => {
                    tracing::error!(
                        path = %config.path.display(),
                        error = %e,
                        "KEY STORE DEGRADED: cannot open SQLite key database, falling back to \
                         in-memory storage. Issued keys will be lost on restart."
                    );
                    Self::memory()
                }
            },
        };

        if config.recreate_on_startup {
            if let Err(e) = backend.recreate().await {
                tracing::error!(
                    error = %e,
                    "KEY STORE DEGRADED: recreating the key store at startup failed, falling \
                     back to in-memory storage."
                );
                return Self::memory();
            }
        }

        backend
    }

    /// Create a new memory backend
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryKeyStore::new())
    }

    /// Returns true if this is the in-memory fallback
    #[must_use]
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }

    /// Storage mode label for logs and health reporting
    pub fn mode_label(&self) -> &'static str {
        if self.is_persistent() {
            "persistent"
        } else {
            "fallback"
        }
    }
}

#[async_trait]
impl KeyStore for KeyStoreBackend {
    async fn get(&self, kid: KeyId) -> Result<Option<ExpirableKey>, DomainError> {
        match self {
            Self::Sqlite(s) => s.get(kid).await,
            Self::Memory(s) => s.get(kid).await,
        }
    }

    async fn set(&self, kid: KeyId, key: &ExpirableKey) -> Result<(), DomainError> {
        match self {
            Self::Sqlite(s) => s.set(kid, key).await,
            Self::Memory(s) => s.set(kid, key).await,
        }
    }

    async fn insert_new(&self, kid: KeyId, key: &ExpirableKey) -> Result<bool, DomainError> {
        match self {
            Self::Sqlite(s) => s.insert_new(kid, key).await,
            Self::Memory(s) => s.insert_new(kid, key).await,
        }
    }

    async fn delete(&self, kid: KeyId) -> Result<(), DomainError> {
        match self {
            Self::Sqlite(s) => s.delete(kid).await,
            Self::Memory(s) => s.delete(kid).await,
        }
    }

    async fn contains(&self, kid: KeyId) -> Result<bool, DomainError> {
        match self {
            Self::Sqlite(s) => s.contains(kid).await,
            Self::Memory(s) => s.contains(kid).await,
        }
    }

    async fn list_identifiers(&self) -> Result<Vec<KeyId>, DomainError> {
        match self {
            Self::Sqlite(s) => s.list_identifiers().await,
            Self::Memory(s) => s.list_identifiers().await,
        }
    }

    async fn recreate(&self) -> Result<(), DomainError> {
        match self {
            Self::Sqlite(s) => s.recreate().await,
            Self::Memory(s) => s.recreate().await,
        }
    }

    fn is_persistent(&self) -> bool {
        match self {
            Self::Sqlite(s) => s.is_persistent(),
            Self::Memory(s) => s.is_persistent(),
        }
    }
}

impl std::fmt::Debug for KeyStoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(s) => write!(f, "KeyStoreBackend::Sqlite({})", s.path().display()),
            Self::Memory(_) => write!(f, "KeyStoreBackend::Memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_mode_skips_sqlite() {
        let backend = KeyStoreBackend::connect(&StorageConfig::memory()).await;
        assert!(backend.is_memory());
        assert_eq!(backend.mode_label(), "fallback");
    }

    #[tokio::test]
    async fn test_debug_impl() {
        let backend = KeyStoreBackend::memory();
        assert_eq!(format!("{:?}", backend), "KeyStoreBackend::Memory");
    }
}
