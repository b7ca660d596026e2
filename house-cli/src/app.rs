//! Startup wiring: store registry, store and wizard.

use anyhow::{Context, Result};
use house_core::storage::{MemoryStoreFactory, StoreRegistry, records};
use house_core::wizard::default_contributors;
use house_core::{LocalStore, Wizard, WizardView};
use house_store_sqlite::SqliteStoreFactory;

use crate::config::HouseConfig;

/// Build a [`StoreRegistry`] with every backend compiled into this binary.
///
/// Add new backends here as they are implemented.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Everything one session works with. Built once by [`bootstrap`].
pub struct App<V: WizardView> {
    pub store: Box<dyn LocalStore>,
    pub wizard: Wizard<V>,
}

/// Opens the configured store, seeds the financial profile, restores the
/// wizard from its snapshot and attaches the summary contributors.
///
/// Each call builds an independent [`App`].
pub async fn bootstrap<V: WizardView>(
    config: &HouseConfig,
    view: V,
) -> Result<App<V>> {
    tracing::debug!(backend = %config.store.backend, "opening store");
    let store = build_registry()
        .create(&config.store)
        .await
        .with_context(|| format!("cannot open '{}' store", config.store.backend))?;

    if records::init_profile(store.as_ref())
        .await
        .context("cannot initialise financial profile")?
    {
        tracing::info!("created empty financial profile");
    }

    let mut wizard = Wizard::load(config.wizard.clone(), view, store.as_ref()).await;
    for contributor in default_contributors() {
        wizard.add_contributor(contributor);
    }

    Ok(App { store, wizard })
}
