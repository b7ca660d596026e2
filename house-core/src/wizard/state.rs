use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::WizardConfig;
use crate::models::Field;

pub const TOTAL_STEPS: u8 = 6;

/// The report step. Reaching it builds the summary.
pub const REPORT_STEP: u8 = TOTAL_STEPS;

/// Everything the wizard remembers between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    /// Current step, `1..=total`.
    pub step: u8,
    pub total: u8,
    /// Field name to chosen chip value. Absent means not chosen yet.
    pub selections: BTreeMap<String, String>,
    /// Target price in whole naira.
    pub budget: i64,
    pub down_pct: u8,
    pub bedrooms: u8,
}

impl WizardState {
    pub fn new(config: &WizardConfig) -> Self {
        Self {
            step: 1,
            total: TOTAL_STEPS,
            selections: BTreeMap::new(),
            budget: config.clamp_budget(config.default_budget),
            down_pct: config.default_down_pct.min(100),
            bedrooms: config.default_bedrooms,
        }
    }

    pub fn selection(
        &self,
        field: Field,
    ) -> Option<&str> {
        self.selections
            .get(field.as_str())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Fields that must be chosen before leaving the current step.
    pub fn missing_fields(&self) -> Vec<Field> {
        required_fields(self.step)
            .iter()
            .copied()
            .filter(|f| self.selection(*f).is_none())
            .collect()
    }

    pub fn step_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.step > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.step < self.total && self.step_complete()
    }

    /// Progress bar width: 0 on the first step, 100 on the last.
    pub fn progress_pct(&self) -> Decimal {
        if self.total <= 1 {
            return Decimal::ONE_HUNDRED;
        }
        Decimal::from(self.step.saturating_sub(1)) / Decimal::from(self.total - 1)
            * Decimal::ONE_HUNDRED
    }

    /// Budget minus the down payment, never negative.
    pub fn financed_amount(&self) -> Decimal {
        let budget = Decimal::from(self.budget);
        let share = Decimal::ONE - Decimal::from(self.down_pct) / Decimal::ONE_HUNDRED;
        (budget * share).max(Decimal::ZERO)
    }
}

/// Selections each step needs before `next` is allowed.
pub fn required_fields(step: u8) -> &'static [Field] {
    match step {
        1 => &[Field::BuyerType, Field::Salary],
        2 => &[Field::Location],
        3 => &[Field::PropertyType],
        4 => &[Field::PaymentMethod],
        5 => &[Field::Lifestyle, Field::Timeframe],
        _ => &[],
    }
}

/// Contextual tip shown under the current step.
pub fn tip(step: u8) -> Option<&'static str> {
    match step {
        1 => Some(
            "Tip: If you are a first-time buyer, target emergency funds and a 20% down payment to reduce monthly costs.",
        ),
        2 => Some(
            "Tip: Consider commute, security, and flood history. We'll suggest nearby areas automatically.",
        ),
        3 => Some(
            "Tip: You can adjust Target price; we prefilled based on income to keep it realistic.",
        ),
        4 => Some(
            "Tip: A higher down payment reduces your monthly mortgage. Typical minimum is 20%.",
        ),
        5 => Some("Tip: Your timeframe helps us prioritize options and negotiation strategy."),
        6 => Some(
            "Tip: Save, Export or Send to an agent. You can resume later from this device.",
        ),
        _ => None,
    }
}
