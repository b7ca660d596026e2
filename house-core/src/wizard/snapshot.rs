use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::WizardConfig;
use super::state::{TOTAL_STEPS, WizardState};
use crate::storage::PersistError;

/// A full copy of the wizard state as written by `save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    #[serde(flatten)]
    pub state: WizardState,
    pub saved_at: DateTime<Utc>,
}

/// A snapshot as read back from storage. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSnapshot {
    pub step: Option<i64>,
    pub total: Option<i64>,
    pub selections: Option<BTreeMap<String, String>>,
    pub budget: Option<i64>,
    pub down_pct: Option<i64>,
    pub bedrooms: Option<i64>,
    pub saved_at: Option<String>,
}

impl PartialSnapshot {
    /// Rejects a step outside the flow or a flow of a different length.
    pub fn validate(&self) -> Result<(), PersistError> {
        let total = self.total.unwrap_or(i64::from(TOTAL_STEPS));
        let step = self.step.unwrap_or(1);
        if total != i64::from(TOTAL_STEPS) || !(1..=total).contains(&step) {
            return Err(PersistError::StepOutOfRange { step, total });
        }
        Ok(())
    }

    /// Lays the snapshot over `defaults`; present fields win.
    ///
    /// Numeric fields are clamped to the slider bounds in `config`.
    pub fn merge_over(
        self,
        defaults: WizardState,
        config: &WizardConfig,
    ) -> WizardState {
        let step = self
            .step
            .and_then(|s| u8::try_from(s.clamp(1, i64::from(TOTAL_STEPS))).ok())
            .unwrap_or(defaults.step);

        WizardState {
            step,
            total: TOTAL_STEPS,
            selections: self.selections.unwrap_or(defaults.selections),
            budget: self
                .budget
                .map_or(defaults.budget, |b| config.clamp_budget(b)),
            down_pct: self
                .down_pct
                .and_then(|d| u8::try_from(d.clamp(0, 100)).ok())
                .unwrap_or(defaults.down_pct),
            bedrooms: self
                .bedrooms
                .map_or(defaults.bedrooms, |b| config.clamp_bedrooms(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn defaults() -> (WizardState, WizardConfig) {
        let cfg = WizardConfig::default();
        (WizardState::new(&cfg), cfg)
    }

    #[test]
    fn snapshot_flattens_state_and_adds_saved_at() {
        let (state, _) = defaults();
        let snapshot = WizardSnapshot {
            state,
            saved_at: Utc.timestamp_opt(0, 0).unwrap(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["step"], 1);
        assert_eq!(json["budget"], 35_000_000);
        assert_eq!(json["savedAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn partial_snapshot_merges_over_defaults() {
        let (state, cfg) = defaults();
        let partial: PartialSnapshot =
            serde_json::from_str(r#"{"step":3,"selections":{"location":"yaba"},"bedrooms":5}"#)
                .unwrap();

        let merged = partial.merge_over(state.clone(), &cfg);

        assert_eq!(merged.step, 3);
        assert_eq!(merged.bedrooms, 5);
        assert_eq!(merged.budget, state.budget);
        assert_eq!(merged.selections.get("location").map(String::as_str), Some("yaba"));
    }

    #[test]
    fn merge_clamps_numeric_fields() {
        let (state, cfg) = defaults();
        let partial = PartialSnapshot {
            budget: Some(1),
            down_pct: Some(250),
            bedrooms: Some(-2),
            ..Default::default()
        };

        let merged = partial.merge_over(state, &cfg);

        assert_eq!(merged.budget, cfg.budget_min);
        assert_eq!(merged.down_pct, 100);
        assert_eq!(merged.bedrooms, cfg.bedrooms_min);
    }

    #[test]
    fn validate_rejects_step_outside_flow() {
        let bad = PartialSnapshot {
            step: Some(9),
            ..Default::default()
        };

        assert!(matches!(
            bad.validate(),
            Err(PersistError::StepOutOfRange { step: 9, total: 6 })
        ));
    }

    #[test]
    fn validate_rejects_other_flow_length() {
        let bad = PartialSnapshot {
            step: Some(2),
            total: Some(4),
            ..Default::default()
        };

        assert!(bad.validate().is_err());
        assert!(PartialSnapshot::default().validate().is_ok());
    }
}
