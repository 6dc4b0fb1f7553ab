//! In-memory key store, used when durable storage is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::ExpirableKey;
use crate::domain::value_objects::KeyId;
use crate::errors::DomainError;

use super::r#trait::KeyStore;

/// Non-durable key store backed by a `HashMap` behind one mutex
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    keys: Mutex<HashMap<KeyId, ExpirableKey>>,
}

impl MemoryKeyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, expired ones included
    pub async fn len(&self) -> usize {
        self.keys.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn get(&self, kid: KeyId) -> Result<Option<ExpirableKey>, DomainError> {
        Ok(self.keys.lock().await.get(&kid).cloned())
    }

    async fn set(&self, kid: KeyId, key: &ExpirableKey) -> Result<(), DomainError> {
        self.keys.lock().await.insert(kid, key.clone());
        Ok(())
    }

    async fn insert_new(&self, kid: KeyId, key: &ExpirableKey) -> Result<bool, DomainError> {
        let mut keys = self.keys.lock().await;
        if keys.contains_key(&kid) {
            return Ok(false);
        }
        keys.insert(kid, key.clone());
        Ok(true)
    }

    async fn delete(&self, kid: KeyId) -> Result<(), DomainError> {
        self.keys.lock().await.remove(&kid);
        Ok(())
    }

    async fn contains(&self, kid: KeyId) -> Result<bool, DomainError> {
        Ok(self.keys.lock().await.contains_key(&kid))
    }

    async fn list_identifiers(&self) -> Result<Vec<KeyId>, DomainError> {
        Ok(self.keys.lock().await.keys().copied().collect())
    }

    async fn recreate(&self) -> Result<(), DomainError> {
        let mut keys = self.keys.lock().await;
        tracing::info!(dropped = keys.len(), "Clearing in-memory key store");
        keys.clear();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
