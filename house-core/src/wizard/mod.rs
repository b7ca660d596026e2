//! The six-step home-buying assessment.
//!
//! [`Wizard`] owns a [`WizardState`] and drives a [`WizardView`]. State is
//! persisted as a [`WizardSnapshot`] and restored by merging a
//! [`PartialSnapshot`] over the defaults.

mod config;
mod machine;
pub mod share;
pub mod snapshot;
mod state;
pub mod summary;
mod view;

pub use config::WizardConfig;
pub use machine::Wizard;
pub use share::{AgentChannel, AgentContact, ShareAction, ShareTarget};
pub use snapshot::{PartialSnapshot, WizardSnapshot};
pub use state::{REPORT_STEP, TOTAL_STEPS, WizardState, required_fields, tip};
pub use summary::{
    ChecklistBlock, MarketplaceLink, PersonalizedChecklist, Summary, SummaryContributor,
    SummaryExtras, default_contributors,
};
pub use view::{NullView, WizardView};
