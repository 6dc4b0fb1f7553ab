//! SQLite implementation of the KeyStore trait.
//!
//! Keys are stored as their PKCS#1 PEM export in the `key` column, with the
//! expiration as epoch seconds in `exp`. One connection behind one async
//! mutex serializes every operation, including `recreate`. A recreate that
//! fails after closing the old connection leaves the store closed, and every
//! operation fails until a later recreate succeeds.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::DateTime;
use sqlx::SqliteConnection;
use tokio::sync::Mutex;

use jwks_core::domain::entities::ExpirableKey;
use jwks_core::domain::value_objects::KeyId;
use jwks_core::errors::DomainError;
use jwks_core::repositories::KeyStore;

use crate::database::connection::SqliteConnector;
use crate::InfrastructureError;

/// SQLite implementation of KeyStore
pub struct SqliteKeyStore {
    connector: SqliteConnector,
    pub(crate) conn: Mutex<Option<SqliteConnection>>,
}

/// The open connection, or `Closed` after a failed recreate
fn live(
    slot: &mut Option<SqliteConnection>,
) -> Result<&mut SqliteConnection, InfrastructureError> {
    slot.as_mut().ok_or(InfrastructureError::Closed)
}

impl SqliteKeyStore {
    /// Open the key database at `path`
    ///
    /// # Arguments
    /// * `path` - Database file, created with its schema when missing
    ///
    /// # Returns
    /// A store whose connection passed a health check
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let connector = SqliteConnector::new(path);
        let mut conn = connector.open().await?;

        if !SqliteConnector::health_check(&mut conn).await? {
            return Err(InfrastructureError::CorruptRecord(format!(
                "{} failed its health check",
                connector.path().display()
            )));
        }

        tracing::info!(path = %connector.path().display(), "Key database opened");
        Ok(Self {
            connector,
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        self.connector.path()
    }

    /// Rebuild a key from its stored columns
    fn row_to_key(kid: KeyId, pem: Vec<u8>, exp: i64) -> Result<ExpirableKey, InfrastructureError> {
        let pem = String::from_utf8(pem).map_err(|_| {
            InfrastructureError::CorruptRecord(format!("key {} is not valid PEM text", kid))
        })?;
        let expires_at = DateTime::from_timestamp(exp, 0).ok_or_else(|| {
            InfrastructureError::CorruptRecord(format!("key {} has expiration {} out of range", kid, exp))
        })?;

        ExpirableKey::from_pkcs1_pem(&pem, expires_at)
            .map_err(|e| InfrastructureError::CorruptRecord(format!("key {}: {}", kid, e)))
    }
}

#[async_trait]
impl KeyStore for SqliteKeyStore {
    async fn get(&self, kid: KeyId) -> Result<Option<ExpirableKey>, DomainError> {
        let row = {
            let mut slot = self.conn.lock().await;
            let conn = live(&mut slot)?;
            sqlx::query_as::<_, (Vec<u8>, i64)>("SELECT key, exp FROM keys WHERE kid = ?")
                .bind(kid.value())
                .fetch_optional(&mut *conn)
                .await
                .map_err(InfrastructureError::from)?
        };

        match row {
            Some((pem, exp)) => Ok(Some(Self::row_to_key(kid, pem, exp)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, kid: KeyId, key: &ExpirableKey) -> Result<(), DomainError> {
        let mut slot = self.conn.lock().await;
        let conn = live(&mut slot)?;
        sqlx::query("INSERT OR REPLACE INTO keys (kid, key, exp) VALUES (?, ?, ?)")
            .bind(kid.value())
            .bind(key.private_key_pem().as_bytes())
            .bind(key.expires_at().timestamp())
            .execute(&mut *conn)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(())
    }

    async fn insert_new(&self, kid: KeyId, key: &ExpirableKey) -> Result<bool, DomainError> {
        let mut slot = self.conn.lock().await;
        let conn = live(&mut slot)?;
        let result = sqlx::query("INSERT OR IGNORE INTO keys (kid, key, exp) VALUES (?, ?, ?)")
            .bind(kid.value())
            .bind(key.private_key_pem().as_bytes())
            .bind(key.expires_at().timestamp())
            .execute(&mut *conn)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, kid: KeyId) -> Result<(), DomainError> {
        let mut slot = self.conn.lock().await;
        let conn = live(&mut slot)?;
        sqlx::query("DELETE FROM keys WHERE kid = ?")
            .bind(kid.value())
            .execute(&mut *conn)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(())
    }

    async fn contains(&self, kid: KeyId) -> Result<bool, DomainError> {
        let mut slot = self.conn.lock().await;
        let conn = live(&mut slot)?;
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM keys WHERE kid = ?)")
            .bind(kid.value())
            .fetch_one(&mut *conn)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(exists != 0)
    }

    async fn list_identifiers(&self) -> Result<Vec<KeyId>, DomainError> {
        let mut slot = self.conn.lock().await;
        let conn = live(&mut slot)?;
        let ids: Vec<i64> = sqlx::query_scalar("SELECT kid FROM keys")
            .fetch_all(&mut *conn)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(ids.into_iter().map(KeyId::new).collect())
    }

    async fn recreate(&self) -> Result<(), DomainError> {
        let mut slot = self.conn.lock().await;

        if let Some(old) = slot.take() {
            if let Err(e) = sqlx::Connection::close(old).await {
                tracing::warn!("Failed to close replaced key database connection: {}", e);
            }
        }

        let reopened = match self.connector.remove_file().await {
            Ok(()) => self.connector.open().await,
            Err(e) => Err(e),
        };
        let fresh = reopened.map_err(|e| {
            tracing::error!(
                path = %self.connector.path().display(),
                "Key database closed after a failed recreate: {}",
                e
            );
            e
        })?;
        *slot = Some(fresh);

        tracing::info!(path = %self.connector.path().display(), "Key database recreated");
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        true
    }
}
