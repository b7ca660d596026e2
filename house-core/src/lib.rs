pub mod calculations;
pub mod format;
pub mod input;
pub mod models;
pub mod storage;
pub mod wizard;

pub use storage::{LocalStore, PersistError, StorageError};
pub use wizard::{Wizard, WizardConfig, WizardState, WizardView};
