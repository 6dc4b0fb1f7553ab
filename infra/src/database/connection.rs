//! SQLite connection management
//!
//! Opens the key database file, creating it and its schema when missing,
//! and provides the health check used when probing the backend at startup.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Row, SqliteConnection};

use crate::InfrastructureError;

/// Schema of the key table
pub const KEYS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS keys(\
    kid INTEGER PRIMARY KEY AUTOINCREMENT, \
    key BLOB NOT NULL, \
    exp INTEGER NOT NULL\
)";

/// Connection factory for one SQLite key database file
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteConnector {
    /// Create a connector for the database at `path`
    ///
    /// The file is created on first open. Rollback journaling keeps the
    /// whole database in that single file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);

        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection and make sure the key table exists
    ///
    /// # Returns
    /// * `Result<SqliteConnection, InfrastructureError>` - Ready connection or error
    pub async fn open(&self) -> Result<SqliteConnection, InfrastructureError> {
        tracing::debug!(path = %self.path.display(), "Opening key database");

        let mut conn = self.options.connect().await.map_err(|e| {
            tracing::error!(path = %self.path.display(), "Failed to open key database: {}", e);
            InfrastructureError::Database(e)
        })?;

        sqlx::query(KEYS_SCHEMA).execute(&mut conn).await?;

        Ok(conn)
    }

    /// Delete the database file; a missing file is not an error
    pub async fn remove_file(&self) -> Result<(), InfrastructureError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::Io(e)),
        }
    }

    /// Check if a connection is usable
    ///
    /// Performs a simple query to verify connectivity.
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if healthy, error otherwise
    pub async fn health_check(conn: &mut SqliteConnection) -> Result<bool, InfrastructureError> {
        let row = sqlx::query("SELECT 1").fetch_one(&mut *conn).await?;
        let value: i64 = row.try_get(0)?;

        if value == 1 {
            Ok(true)
        } else {
            tracing::warn!("Database health check returned unexpected value: {}", value);
            Ok(false)
        }
    }
}
