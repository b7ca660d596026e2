use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::factory::{StoreConfig, StoreFactory};
use super::store::{LocalStore, StorageError};

/// Process-local store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::Backend(format!("memory store lock poisoned: {e}")))
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// [`StoreFactory`] for the `"memory"` backend.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn LocalStore>, StorageError> {
        Ok(Box::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryStore::new();

        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        assert_eq!(MemoryStore::new().get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_absent_key_is_ok() {
        let store = MemoryStore::with_entries([("a", "1")]);

        store.remove("b").await.unwrap();
        store.remove("a").await.unwrap();

        assert!(store.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn keys_are_sorted() {
        let store = MemoryStore::with_entries([("savedReports", "[]"), ("buyerChecklist", "{}")]);

        assert_eq!(
            store.keys().await.unwrap(),
            vec!["buyerChecklist".to_string(), "savedReports".to_string()]
        );
    }

    #[tokio::test]
    async fn factory_opens_empty_store() {
        let store = MemoryStoreFactory
            .create(&StoreConfig::default())
            .await
            .unwrap();

        assert!(store.keys().await.unwrap().is_empty());
    }
}
