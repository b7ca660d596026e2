use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// String key/value storage scoped to one device.
///
/// Writes overwrite whatever is stored under the key. There are no
/// transactions; a concurrent writer silently wins or loses.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Value under `key`, or `None` when the key was never set.
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError>;

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StorageError>;

    /// Every stored key, sorted.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;
}
