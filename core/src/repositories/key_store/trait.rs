//! Key store trait defining the persistence contract for signing keys.

use async_trait::async_trait;

use crate::domain::entities::ExpirableKey;
use crate::domain::value_objects::KeyId;
use crate::errors::DomainError;

/// Persistence contract for signing keys, keyed by integer identifier
///
/// Implementations serialize every operation behind a single exclusive lock
/// per store instance, `recreate` included. Each write is atomic per
/// identifier: it either lands completely or not at all.
///
/// The store does not interpret expiration. Expired records are returned
/// like any other; deciding what an expired key means is the caller's job.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Fetch a key by identifier
    ///
    /// # Returns
    /// * `Ok(Some(ExpirableKey))` - Key found (possibly expired)
    /// * `Ok(None)` - No key with this identifier
    /// * `Err(DomainError)` - Backend failure
    async fn get(&self, kid: KeyId) -> Result<Option<ExpirableKey>, DomainError>;

    /// Insert or overwrite the key stored under `kid`
    async fn set(&self, kid: KeyId, key: &ExpirableKey) -> Result<(), DomainError>;

    /// Insert only if `kid` is free
    ///
    /// # Returns
    /// * `Ok(true)` - Key stored
    /// * `Ok(false)` - Identifier already taken; nothing written
    /// * `Err(DomainError)` - Backend failure
    async fn insert_new(&self, kid: KeyId, key: &ExpirableKey) -> Result<bool, DomainError>;

    /// Remove a key; absent identifiers are a no-op
    async fn delete(&self, kid: KeyId) -> Result<(), DomainError>;

    /// Whether any key (expired or not) is stored under `kid`
    async fn contains(&self, kid: KeyId) -> Result<bool, DomainError>;

    /// All stored identifiers, in no particular order
    async fn list_identifiers(&self) -> Result<Vec<KeyId>, DomainError>;

    /// Tear down and reinitialize the storage, dropping every key
    async fn recreate(&self) -> Result<(), DomainError>;

    /// Whether keys survive a restart
    fn is_persistent(&self) -> bool;
}
