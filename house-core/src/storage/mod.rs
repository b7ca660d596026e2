//! Device-local key/value storage and the typed records kept in it.

mod factory;
mod memory;
pub mod records;
mod store;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use records::PersistError;
pub use store::{LocalStore, StorageError};
