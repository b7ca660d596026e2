use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product heuristics and slider defaults for the assessment wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Share of monthly income available for housing.
    pub housing_share: Decimal,
    /// Years of housing capacity a buyer can afford, undiscounted.
    pub affordability_years: u32,
    /// Predicted budgets are rounded to a multiple of this.
    pub budget_rounding: Decimal,
    pub budget_min: i64,
    pub budget_max: i64,
    pub default_budget: i64,
    pub default_down_pct: u8,
    pub default_bedrooms: u8,
    pub bedrooms_min: u8,
    pub bedrooms_max: u8,
    pub mortgage_rate_pct: Decimal,
    pub mortgage_years: u32,
    /// Income assumed for a salary value outside the known brackets.
    pub fallback_monthly_income: i64,
    /// Move straight to step 5 once a payment method is picked on step 4.
    pub auto_advance_on_payment_method: bool,
    /// Lifestyle filled in when step 5 is shown without one.
    pub default_lifestyle: Option<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            housing_share: Decimal::new(33, 2),
            affordability_years: 25,
            budget_rounding: Decimal::from(100_000),
            budget_min: 5_000_000,
            budget_max: 500_000_000,
            default_budget: 35_000_000,
            default_down_pct: 20,
            default_bedrooms: 3,
            bedrooms_min: 1,
            bedrooms_max: 10,
            mortgage_rate_pct: Decimal::from(9),
            mortgage_years: 30,
            fallback_monthly_income: 300_000,
            auto_advance_on_payment_method: false,
            default_lifestyle: None,
        }
    }
}

impl WizardConfig {
    pub fn clamp_budget(
        &self,
        budget: i64,
    ) -> i64 {
        budget.max(self.budget_min).min(self.budget_max.max(self.budget_min))
    }

    pub fn clamp_bedrooms(
        &self,
        bedrooms: i64,
    ) -> u8 {
        let lo = i64::from(self.bedrooms_min);
        let hi = i64::from(self.bedrooms_max).max(lo);
        // lo..=hi fits in u8
        u8::try_from(bedrooms.clamp(lo, hi)).unwrap_or(self.bedrooms_min)
    }
}
