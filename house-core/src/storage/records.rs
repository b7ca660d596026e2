//! Typed access to the JSON values kept in a [`LocalStore`].
//!
//! | key                | value                                       |
//! |--------------------|---------------------------------------------|
//! | `buyerChecklist`   | [`BuyerChecklist`]                          |
//! | `financialProfile` | [`FinancialProfile`]                        |
//! | `savedReports`     | array of [`SavedReport`], oldest first      |
//! | `assessmentReport` | [`WizardSnapshot`]                          |
//!
//! Loaders return `Ok(None)` for an absent key or a literal `null`. A value
//! that does not parse is [`PersistError::Malformed`]; deciding whether to
//! fall back to a default is left to the caller, usually through
//! [`discard_malformed`]. Writers that rebuild a whole value discard an
//! unreadable one.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::{LocalStore, StorageError};
use crate::calculations::advisor::{AdvisorSelections, Predictions};
use crate::models::BuyerChecklist;
use crate::wizard::snapshot::{PartialSnapshot, WizardSnapshot};

pub const CHECKLIST_KEY: &str = "buyerChecklist";
pub const PROFILE_KEY: &str = "financialProfile";
pub const REPORTS_KEY: &str = "savedReports";
pub const SNAPSHOT_KEY: &str = "assessmentReport";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("malformed value under '{key}'")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("saved step {step} is outside 1..={total}")]
    StepOutOfRange { step: i64, total: i64 },
}

async fn read_json<T: DeserializeOwned>(
    store: &dyn LocalStore,
    key: &'static str,
) -> Result<Option<T>, PersistError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str::<Option<T>>(&raw).map_err(|source| PersistError::Malformed { key, source })
}

/// Replaces a [`PersistError::Malformed`] result with the default value,
/// logging the discarded key. Other errors pass through.
pub fn discard_malformed<T: Default>(result: Result<T, PersistError>) -> Result<T, PersistError> {
    match result {
        Err(PersistError::Malformed { key, source }) => {
            tracing::warn!(key, error = %source, "discarding unreadable stored value");
            Ok(T::default())
        }
        other => other,
    }
}

async fn write_json<T: Serialize + ?Sized>(
    store: &dyn LocalStore,
    key: &'static str,
    value: &T,
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &raw).await?;
    Ok(())
}

// =============================================================================
// Buyer checklist
// =============================================================================

pub async fn load_checklist(
    store: &dyn LocalStore
) -> Result<Option<BuyerChecklist>, PersistError> {
    read_json(store, CHECKLIST_KEY).await
}

pub async fn save_checklist(
    store: &dyn LocalStore,
    checklist: &BuyerChecklist,
) -> Result<(), PersistError> {
    write_json(store, CHECKLIST_KEY, checklist).await
}

/// Flips one checklist item and persists the whole map.
///
/// An unreadable stored checklist is replaced by an empty one.
pub async fn toggle_checklist_item(
    store: &dyn LocalStore,
    category: &str,
    item: &str,
) -> Result<BuyerChecklist, PersistError> {
    let mut checklist = discard_malformed(load_checklist(store).await)?.unwrap_or_default();

    let checked = checklist.toggle(category, item);
    save_checklist(store, &checklist).await?;
    tracing::debug!(category, item, checked, "checklist item toggled");
    Ok(checklist)
}

// =============================================================================
// Financial profile
// =============================================================================

/// Latest advisor answers and, when they were complete, the predictions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub selections: AdvisorSelections,
    pub predictions: Option<Predictions>,
    pub timestamp: Option<DateTime<Utc>>,
}

pub async fn load_profile(
    store: &dyn LocalStore
) -> Result<Option<FinancialProfile>, PersistError> {
    read_json(store, PROFILE_KEY).await
}

pub async fn save_profile(
    store: &dyn LocalStore,
    selections: &AdvisorSelections,
    predictions: &Predictions,
    timestamp: DateTime<Utc>,
) -> Result<FinancialProfile, PersistError> {
    let profile = FinancialProfile {
        selections: selections.clone(),
        predictions: Some(predictions.clone()),
        timestamp: Some(timestamp),
    };
    write_json(store, PROFILE_KEY, &profile).await?;
    tracing::info!("financial profile saved");
    Ok(profile)
}

/// Seeds an empty profile when none exists yet. Returns whether it wrote.
pub async fn init_profile(store: &dyn LocalStore) -> Result<bool, PersistError> {
    if store.get(PROFILE_KEY).await?.is_some() {
        return Ok(false);
    }
    write_json(store, PROFILE_KEY, &FinancialProfile::default()).await?;
    Ok(true)
}

// =============================================================================
// Saved reports
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedReport {
    /// Milliseconds since the epoch at save time.
    pub id: i64,
    pub date: DateTime<Utc>,
    pub selections: AdvisorSelections,
    pub predictions: Predictions,
    pub title: String,
}

impl SavedReport {
    pub fn new(
        selections: AdvisorSelections,
        predictions: Predictions,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: saved_at.timestamp_millis(),
            date: saved_at,
            selections,
            predictions,
            title: format!("Home Assessment - {}", saved_at.format("%d/%m/%Y")),
        }
    }
}

/// Saved reports, oldest first. Missing key reads as empty.
pub async fn list_reports(store: &dyn LocalStore) -> Result<Vec<SavedReport>, PersistError> {
    Ok(read_json(store, REPORTS_KEY).await?.unwrap_or_default())
}

/// Appends a report built from `selections` and `predictions`.
///
/// An unreadable report list is replaced by one holding only the new report.
pub async fn save_report(
    store: &dyn LocalStore,
    selections: &AdvisorSelections,
    predictions: &Predictions,
    saved_at: DateTime<Utc>,
) -> Result<SavedReport, PersistError> {
    let mut reports = discard_malformed(list_reports(store).await)?;
    let report = SavedReport::new(selections.clone(), predictions.clone(), saved_at);
    reports.push(report.clone());
    write_json(store, REPORTS_KEY, &reports).await?;
    tracing::info!(id = report.id, total = reports.len(), "report saved");
    Ok(report)
}

pub async fn find_report(
    store: &dyn LocalStore,
    id: i64,
) -> Result<Option<SavedReport>, PersistError> {
    Ok(list_reports(store)
        .await?
        .into_iter()
        .find(|r| r.id == id))
}

/// Removes every report with `id`. Returns whether anything was removed.
pub async fn delete_report(
    store: &dyn LocalStore,
    id: i64,
) -> Result<bool, PersistError> {
    let mut reports = discard_malformed(list_reports(store).await)?;
    let before = reports.len();
    reports.retain(|r| r.id != id);
    write_json(store, REPORTS_KEY, &reports).await?;

    let removed = reports.len() < before;
    tracing::info!(id, removed, "report delete requested");
    Ok(removed)
}

// =============================================================================
// Wizard snapshot
// =============================================================================

/// Overwrites the single wizard snapshot slot.
pub async fn save_snapshot(
    store: &dyn LocalStore,
    snapshot: &WizardSnapshot,
) -> Result<(), PersistError> {
    write_json(store, SNAPSHOT_KEY, snapshot).await?;
    tracing::info!(step = snapshot.state.step, "wizard snapshot saved");
    Ok(())
}

/// Reads and validates the wizard snapshot.
pub async fn load_snapshot(
    store: &dyn LocalStore
) -> Result<Option<PartialSnapshot>, PersistError> {
    let snapshot: Option<PartialSnapshot> = read_json(store, SNAPSHOT_KEY).await?;
    if let Some(s) = &snapshot {
        s.validate()?;
    }
    Ok(snapshot)
}
