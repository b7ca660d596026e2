use async_trait::async_trait;

use house_core::storage::{StoreConfig, StoreFactory};
use house_core::{LocalStore, StorageError};

use crate::SqliteStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`house_core::storage::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use house_core::storage::StoreRegistry;
/// use house_store_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database described by `config.connection_string` and bring
    /// its schema up to date.
    ///
    /// Accepted connection-string values:
    /// * A bare file path, e.g. `"igethouse.db"`. The file is created if it
    ///   does not exist.
    /// * `":memory:"` for an ephemeral in-memory database.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn LocalStore>, StorageError> {
        let store = SqliteStore::new(&config.connection_string).await?;
        store.run_migrations().await?;
        tracing::info!(path = %config.connection_string, "opened sqlite store");
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use house_core::LocalStore;
    use house_core::storage::{StoreConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = StoreConfig::sqlite(":memory:");

        let result = SqliteStoreFactory.create(&config).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory store: {:#?}",
            result.err()
        );

        let store = result.unwrap();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
