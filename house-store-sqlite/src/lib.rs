//! SQLite-backed [`LocalStore`].

mod factory;

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use house_core::{LocalStore, StorageError};
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use factory::SqliteStoreFactory;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `connection_string`, creating the file if needed.
    ///
    /// Accepts a bare file path, a `sqlite:` URL, or `":memory:"`.
    pub async fn new(connection_string: &str) -> Result<Self, StorageError> {
        let options = connect_options(connection_string)?;
        // A single connection keeps an in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    /// When `key` was last written, if it exists.
    pub async fn updated_at(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, StorageError> {
        let row = sqlx::query_as::<_, EntryRow>(
            "SELECT key, value, updated_at FROM local_storage WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        match row.and_then(|r| r.updated_at) {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| StorageError::Serialization(format!("Invalid timestamp {raw}: {e}"))),
            None => Ok(None),
        }
    }
}

fn connect_options(connection_string: &str) -> Result<SqliteConnectOptions, StorageError> {
    if connection_string == ":memory:" {
        return SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::Configuration(e.to_string()));
    }
    if connection_string.starts_with("sqlite:") {
        return SqliteConnectOptions::from_str(connection_string)
            .map(|o| o.create_if_missing(true))
            .map_err(|e| StorageError::Configuration(e.to_string()));
    }
    Ok(SqliteConnectOptions::new()
        .filename(connection_string)
        .create_if_missing(true))
}

#[derive(FromRow)]
#[allow(dead_code)]
struct EntryRow {
    key: String,
    value: String,
    updated_at: Option<String>,
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        let row = sqlx::query_as::<_, EntryRow>(
            "SELECT key, value, updated_at FROM local_storage WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(row.map(|r| r.value))
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let keys: Vec<(String,)> = sqlx::query_as("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(keys.into_iter().map(|(k,)| k).collect())
    }
}
