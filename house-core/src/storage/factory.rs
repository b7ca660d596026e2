//! Backend selection for the [`LocalStore`].
//!
//! Front ends register every backend they link against, then open the one
//! named in configuration.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::store::{LocalStore, StorageError};

/// Which store to open and where.
///
/// | backend  | location                                  |
/// |----------|-------------------------------------------|
/// | `sqlite` | file path, `sqlite:` URL, or `:memory:`   |
/// | `memory` | ignored                                   |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl StoreConfig {
    /// A throwaway in-process store.
    pub fn memory() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }

    /// A SQLite database at `location`.
    pub fn sqlite(location: impl Into<String>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: location.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::sqlite("igethouse.db")
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.connection_string.is_empty() {
            f.write_str(&self.backend)
        } else {
            write!(f, "{} ({})", self.backend, self.connection_string)
        }
    }
}

/// Opens stores of one backend.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Name matched against [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn LocalStore>, StorageError>;
}

/// Registered [`StoreFactory`]s by backend name.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`. A later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the store named by `config.backend`.
    ///
    /// An unregistered name is [`StorageError::Configuration`] listing what
    /// is registered. Factory errors pass through.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn LocalStore>, StorageError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StorageError::Configuration(format!(
                "no store backend named '{}' (registered: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(store = %config, "opening local store");
        factory.create(config).await
    }
}
