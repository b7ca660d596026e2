//! Smart advisor: property predictions from a salary tier, a location and a
//! lifestyle.
//!
//! # Method
//!
//! 1. Average monthly income is the midpoint of the salary tier.
//! 2. Housing capacity is what remains after the lifestyle's expense and
//!    savings ratios.
//! 3. A property type is suitable when its minimum price is within 120% of
//!    `capacity × 12 × 25`.
//! 4. The cheapest suitable type drives the price range, investment metrics
//!    and payment plans.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{min, round_whole};
use crate::format::format_naira;
use crate::models::market::{self, MarketEntry};
use crate::models::ReportSection;

const CAPACITY_YEARS: u32 = 25;
const SUITABILITY_HEADROOM: Decimal = Decimal::from_parts(12, 0, 0, false, 1);
const SCORE_CAPACITY_BASE: Decimal = Decimal::from_parts(500_000, 0, 0, false, 0);
const SCORE_PER_TYPE: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
const MORTGAGE_LOAN_SHARE: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const MORTGAGE_MONTHLY_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 4);
const MORTGAGE_TERM_YEARS: u32 = 30;
const INSTALLMENT_TERM_YEARS: u32 = 5;
const DOWN_PAYMENT_TARGET_MONTHS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    #[error("no {0} selected")]
    MissingSelection(&'static str),

    #[error("unknown salary tier '{0}'")]
    UnknownTier(String),

    #[error("unknown lifestyle '{0}'")]
    UnknownLifestyle(String),

    #[error("no market data for location '{0}'")]
    NoMarketData(String),

    #[error("no property type in '{location}' fits a monthly capacity of {capacity}")]
    NothingAffordable { location: String, capacity: Decimal },
}

// =============================================================================
// Selections
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryTier {
    Junior,
    Mid,
    Senior,
    Executive,
}

impl SalaryTier {
    pub const ALL: [SalaryTier; 4] = [Self::Junior, Self::Mid, Self::Senior, Self::Executive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Executive => "executive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Monthly income bounds in naira.
    pub fn range(&self) -> (i64, i64) {
        match self {
            Self::Junior => (150_000, 300_000),
            Self::Mid => (300_000, 600_000),
            Self::Senior => (600_000, 1_200_000),
            Self::Executive => (1_200_000, 5_000_000),
        }
    }

    pub fn average_income(&self) -> Decimal {
        let (lo, hi) = self.range();
        Decimal::from(lo + hi) / Decimal::TWO
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Junior => "₦150k - ₦300k/month",
            Self::Mid => "₦300k - ₦600k/month",
            Self::Senior => "₦600k - ₦1.2M/month",
            Self::Executive => "₦1.2M+/month",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Junior => "₦150k - ₦300k monthly income",
            Self::Mid => "₦300k - ₦600k monthly income",
            Self::Senior => "₦600k - ₦1.2M monthly income",
            Self::Executive => "₦1.2M+ monthly income",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifestyle {
    Minimal,
    Moderate,
    Comfort,
    Luxury,
}

impl Lifestyle {
    pub const ALL: [Lifestyle; 4] = [Self::Minimal, Self::Moderate, Self::Comfort, Self::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Comfort => "comfort",
            Self::Luxury => "luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    /// Shares of income going to living expenses and to savings.
    pub fn ratios(&self) -> (Decimal, Decimal) {
        match self {
            Self::Minimal => (Decimal::new(4, 1), Decimal::new(3, 1)),
            Self::Moderate => (Decimal::new(5, 1), Decimal::new(2, 1)),
            Self::Comfort => (Decimal::new(6, 1), Decimal::new(15, 2)),
            Self::Luxury => (Decimal::new(7, 1), Decimal::new(1, 1)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal Living",
            Self::Moderate => "Moderate Lifestyle",
            Self::Comfort => "Comfort Seeker",
            Self::Luxury => "Luxury Living",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal Living lifestyle",
            Self::Moderate => "Moderate Lifestyle",
            Self::Comfort => "Comfort Seeker",
            Self::Luxury => "Luxury Living",
        }
    }
}

fn location_label(location: &str) -> Option<&'static str> {
    match location {
        "lekki" => Some("Lekki/Ajah"),
        "ikeja" => Some("Ikeja"),
        "yaba" => Some("Yaba"),
        "other" => Some("Other Areas"),
        _ => None,
    }
}

fn location_description(location: &str) -> Option<&'static str> {
    match location {
        "lekki" => Some("Lekki/Ajah area"),
        "ikeja" => Some("Ikeja area"),
        "yaba" => Some("Yaba area"),
        "other" => Some("Other areas"),
        _ => None,
    }
}

/// The three advisor questions, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorStep {
    Salary,
    Location,
    Lifestyle,
}

impl AdvisorStep {
    pub const ORDER: [AdvisorStep; 3] = [Self::Salary, Self::Location, Self::Lifestyle];

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Salary => {
                "👋 Hi! I'll help you find your dream home. Let's start with your salary range."
            }
            Self::Location => "Great! Now, which area interests you?",
            Self::Lifestyle => "Finally, what's your preferred lifestyle?",
        }
    }
}

/// Raw answers to the advisor questions. Any of them may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSelections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
}

impl AdvisorSelections {
    pub fn get(
        &self,
        step: AdvisorStep,
    ) -> Option<&str> {
        match step {
            AdvisorStep::Salary => self.salary.as_deref(),
            AdvisorStep::Location => self.location.as_deref(),
            AdvisorStep::Lifestyle => self.lifestyle.as_deref(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_missing().is_none()
    }

    /// First unanswered question, if any.
    pub fn next_missing(&self) -> Option<AdvisorStep> {
        AdvisorStep::ORDER
            .into_iter()
            .find(|step| self.get(*step).is_none_or(str::is_empty))
    }

    /// Sentence describing one answer, e.g. `"Ikeja area"`.
    pub fn describe(
        &self,
        step: AdvisorStep,
    ) -> &'static str {
        let value = self.get(step).unwrap_or_default();
        let text = match step {
            AdvisorStep::Salary => SalaryTier::parse(value).map(|t| t.description()),
            AdvisorStep::Location => location_description(value),
            AdvisorStep::Lifestyle => Lifestyle::parse(value).map(|l| l.description()),
        };
        text.unwrap_or("Not selected")
    }
}

// =============================================================================
// Predictions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Annual capital growth, percent.
    pub growth: u32,
    /// Gross rental yield, percent.
    pub rental: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    /// Whole naira per month.
    pub monthly: i64,
    /// Years.
    pub term: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlans {
    pub mortgage: PaymentPlan,
    pub installment: PaymentPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predictions {
    pub property_type: String,
    pub price_range: String,
    pub suggested_areas: Vec<String>,
    pub affordability_score: u32,
    pub investment_metrics: InvestmentMetrics,
    pub payment_plans: PaymentPlans,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    pub title: &'static str,
    pub description: String,
    pub metric: Option<String>,
}

/// Colour band of the affordability score gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        if score >= 80 {
            Self::Strong
        } else if score >= 60 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Strong => "#4CAF50",
            Self::Fair => "#FFC107",
            Self::Weak => "#FF5722",
        }
    }
}

impl Predictions {
    /// Property type with its first letter capitalized.
    pub fn property_type_title(&self) -> String {
        let mut chars = self.property_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Select preferences".to_string(),
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::of(self.affordability_score)
    }

    /// Four-step action plan from saving to inspection.
    pub fn timeline(&self) -> Vec<TimelineStep> {
        let monthly = Decimal::from(self.payment_plans.mortgage.monthly);
        let first_area = self
            .suggested_areas
            .first()
            .map(String::as_str)
            .unwrap_or_default();

        vec![
            TimelineStep {
                title: "Start Saving",
                description: "Begin with the down payment goal".to_string(),
                metric: Some(format!(
                    "Target: {}",
                    format_naira(monthly * Decimal::from(DOWN_PAYMENT_TARGET_MONTHS))
                )),
            },
            TimelineStep {
                title: "Property Search",
                description: format!("Focus on {first_area} area"),
                metric: Some(format!("Budget: {}", self.price_range)),
            },
            TimelineStep {
                title: "Financial Planning",
                description: "Prepare mortgage documentation".to_string(),
                metric: Some(format!("Monthly Payment: {}", format_naira(monthly))),
            },
            TimelineStep {
                title: "Property Inspection",
                description: "Schedule viewings and assessments".to_string(),
                metric: None,
            },
        ]
    }

    /// Printable report: profile, recommendation and financial analysis.
    pub fn report(
        &self,
        selections: &AdvisorSelections,
    ) -> Vec<ReportSection> {
        let salary = selections
            .salary
            .as_deref()
            .and_then(SalaryTier::parse)
            .map_or("-", |t| t.label());
        let location = selections
            .location
            .as_deref()
            .and_then(location_label)
            .unwrap_or("-");
        let lifestyle = selections
            .lifestyle
            .as_deref()
            .and_then(Lifestyle::parse)
            .map_or("-", |l| l.label());

        vec![
            ReportSection::new(
                "Profile Summary",
                [
                    ("Income Range", salary.to_string()),
                    ("Location", location.to_string()),
                    ("Lifestyle", lifestyle.to_string()),
                ],
            ),
            ReportSection::new(
                "Property Recommendations",
                [
                    ("Recommended Type", self.property_type.clone()),
                    ("Price Range", self.price_range.clone()),
                    ("Suggested Areas", self.suggested_areas.join(", ")),
                ],
            ),
            ReportSection::new(
                "Financial Analysis",
                [
                    (
                        "Affordability Score",
                        format!("{}/100", self.affordability_score),
                    ),
                    (
                        "Monthly Mortgage",
                        format_naira(Decimal::from(self.payment_plans.mortgage.monthly)),
                    ),
                    (
                        "Investment Growth Potential",
                        format!("{}%", self.investment_metrics.growth),
                    ),
                ],
            ),
        ]
    }
}

// =============================================================================
// Advisor
// =============================================================================

/// Stateless predictor over the built-in market table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartAdvisor;

impl SmartAdvisor {
    /// Predicts a recommendation for complete `selections`.
    ///
    /// # Errors
    /// Any missing or unknown answer, a location without market data, or a
    /// capacity too small for every property type.
    pub fn predict(selections: &AdvisorSelections) -> Result<Predictions, AdvisorError> {
        let tier_key = selections
            .salary
            .as_deref()
            .ok_or(AdvisorError::MissingSelection("salary"))?;
        let location = selections
            .location
            .as_deref()
            .ok_or(AdvisorError::MissingSelection("location"))?;
        let lifestyle_key = selections
            .lifestyle
            .as_deref()
            .ok_or(AdvisorError::MissingSelection("lifestyle"))?;

        let tier = SalaryTier::parse(tier_key)
            .ok_or_else(|| AdvisorError::UnknownTier(tier_key.to_string()))?;
        let lifestyle = Lifestyle::parse(lifestyle_key)
            .ok_or_else(|| AdvisorError::UnknownLifestyle(lifestyle_key.to_string()))?;
        let market = market::market_for(location)
            .ok_or_else(|| AdvisorError::NoMarketData(location.to_string()))?;

        let capacity = Self::housing_capacity(tier, lifestyle);
        let suitable = Self::suitable_types(capacity, market);
        let Some(best) = suitable.first().copied() else {
            return Err(AdvisorError::NothingAffordable {
                location: location.to_string(),
                capacity,
            });
        };

        let predictions = Predictions {
            property_type: best.property_type.to_string(),
            price_range: format!(
                "{} - {}",
                format_naira(Decimal::from(best.min_price)),
                format_naira(Decimal::from(best.max_price))
            ),
            suggested_areas: market::suggested_areas(location)
                .unwrap_or(&["Select a location"])
                .iter()
                .map(|s| s.to_string())
                .collect(),
            affordability_score: Self::affordability_score(capacity, suitable.len()),
            investment_metrics: InvestmentMetrics {
                growth: best.growth_pct,
                rental: best.rental_yield_pct,
            },
            payment_plans: Self::payment_plans(Decimal::from(best.min_price)),
        };

        tracing::debug!(
            tier = tier.as_str(),
            location,
            lifestyle = lifestyle.as_str(),
            %capacity,
            suitable = suitable.len(),
            score = predictions.affordability_score,
            "advisor predictions generated"
        );

        Ok(predictions)
    }

    /// Monthly income left for housing after expenses and savings.
    pub fn housing_capacity(
        tier: SalaryTier,
        lifestyle: Lifestyle,
    ) -> Decimal {
        let income = tier.average_income();
        let (expense_ratio, savings_ratio) = lifestyle.ratios();
        income - income * expense_ratio - income * savings_ratio
    }

    /// Property types within reach of `capacity`, cheapest first.
    pub fn suitable_types(
        capacity: Decimal,
        market: &'static [MarketEntry],
    ) -> Vec<&'static MarketEntry> {
        let max_loan = capacity * Decimal::from(12 * CAPACITY_YEARS);
        let ceiling = max_loan * SUITABILITY_HEADROOM;

        let mut suitable: Vec<_> = market
            .iter()
            .filter(|e| Decimal::from(e.min_price) <= ceiling)
            .collect();
        suitable.sort_by_key(|e| e.min_price);
        suitable
    }

    /// Blends capacity against ₦500k and the number of suitable types,
    /// capped at 100.
    pub fn affordability_score(
        capacity: Decimal,
        suitable_count: usize,
    ) -> u32 {
        let base = min(
            capacity / SCORE_CAPACITY_BASE * Decimal::ONE_HUNDRED,
            Decimal::ONE_HUNDRED,
        );
        let types = SCORE_PER_TYPE * Decimal::from(suitable_count as u64);
        let score = min(round_whole((base + types) / Decimal::TWO), Decimal::ONE_HUNDRED);
        score.to_u32().unwrap_or(0)
    }

    /// 80% mortgage at 0.75% a month over 30 years, and a 60-month
    /// installment plan.
    pub fn payment_plans(price: Decimal) -> PaymentPlans {
        let mortgage = round_whole(price * MORTGAGE_LOAN_SHARE * MORTGAGE_MONTHLY_RATE);
        let installment =
            round_whole(price / Decimal::from(12 * INSTALLMENT_TERM_YEARS));
        PaymentPlans {
            mortgage: PaymentPlan {
                monthly: mortgage.to_i64().unwrap_or(i64::MAX),
                term: MORTGAGE_TERM_YEARS,
            },
            installment: PaymentPlan {
                monthly: installment.to_i64().unwrap_or(i64::MAX),
                term: INSTALLMENT_TERM_YEARS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn selections(
        salary: &str,
        location: &str,
        lifestyle: &str,
    ) -> AdvisorSelections {
        AdvisorSelections {
            salary: Some(salary.to_string()),
            location: Some(location.to_string()),
            lifestyle: Some(lifestyle.to_string()),
        }
    }

    // ── capacity and suitability ─────────────────────────────────────────

    #[test]
    fn capacity_subtracts_lifestyle_ratios() {
        assert_eq!(
            SmartAdvisor::housing_capacity(SalaryTier::Mid, Lifestyle::Moderate),
            dec!(135000)
        );
        assert_eq!(
            SmartAdvisor::housing_capacity(SalaryTier::Junior, Lifestyle::Luxury),
            dec!(45000)
        );
    }

    #[test]
    fn suitable_types_sorted_by_min_price() {
        let lekki = market::market_for("lekki").unwrap();

        let types: Vec<_> = SmartAdvisor::suitable_types(dec!(200000), lekki)
            .iter()
            .map(|e| e.property_type)
            .collect();

        // ceiling = 200,000 × 300 × 1.2 = 72,000,000
        assert_eq!(types, vec!["flat", "house", "terrace", "duplex"]);
    }

    #[test]
    fn score_is_capped_at_one_hundred() {
        assert_eq!(SmartAdvisor::affordability_score(dec!(135000), 2), 39);
        assert_eq!(SmartAdvisor::affordability_score(dec!(2000000), 4), 100);
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::of(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(59), ScoreBand::Weak);
    }

    // ── predictions ──────────────────────────────────────────────────────

    #[test]
    fn predicts_cheapest_suitable_type() {
        let p = SmartAdvisor::predict(&selections("mid", "lekki", "moderate")).unwrap();

        assert_eq!(p.property_type, "flat");
        assert_eq!(p.property_type_title(), "Flat");
        assert_eq!(p.price_range, "₦25,000,000 - ₦45,000,000");
        assert_eq!(p.suggested_areas, vec!["Chevron", "Ikate", "Agungi"]);
        assert_eq!(p.affordability_score, 39);
        assert_eq!(p.investment_metrics, InvestmentMetrics { growth: 15, rental: 8 });
        assert_eq!(p.payment_plans.mortgage.monthly, 150_000);
        assert_eq!(p.payment_plans.installment.monthly, 416_667);
    }

    #[test]
    fn timeline_targets_thirty_months_of_mortgage() {
        let p = SmartAdvisor::predict(&selections("mid", "lekki", "moderate")).unwrap();

        let timeline = p.timeline();

        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[0].metric.as_deref(), Some("Target: ₦4,500,000"));
        assert_eq!(timeline[1].description, "Focus on Chevron area");
        assert_eq!(timeline[3].metric, None);
    }

    #[test]
    fn other_location_has_no_market_data() {
        let err = SmartAdvisor::predict(&selections("mid", "other", "moderate")).unwrap_err();

        assert_eq!(err, AdvisorError::NoMarketData("other".to_string()));
    }

    #[test]
    fn low_capacity_finds_nothing_affordable() {
        // junior luxury: 45,000 × 300 × 1.2 = 16,200,000 < every Yaba price
        let err = SmartAdvisor::predict(&selections("junior", "yaba", "luxury")).unwrap_err();

        assert!(matches!(err, AdvisorError::NothingAffordable { .. }));
    }

    #[test]
    fn missing_answer_is_reported() {
        let partial = AdvisorSelections {
            salary: Some("mid".to_string()),
            ..Default::default()
        };

        assert_eq!(
            SmartAdvisor::predict(&partial).unwrap_err(),
            AdvisorError::MissingSelection("location")
        );
        assert_eq!(partial.next_missing(), Some(AdvisorStep::Location));
    }

    #[test]
    fn describe_falls_back_to_not_selected() {
        let s = selections("senior", "ikeja", "unknown");

        assert_eq!(s.describe(AdvisorStep::Salary), "₦600k - ₦1.2M monthly income");
        assert_eq!(s.describe(AdvisorStep::Location), "Ikeja area");
        assert_eq!(s.describe(AdvisorStep::Lifestyle), "Not selected");
    }

    #[test]
    fn report_lists_profile_and_analysis() {
        let s = selections("mid", "lekki", "moderate");
        let p = SmartAdvisor::predict(&s).unwrap();

        let report = p.report(&s);

        assert_eq!(report[0].value("Income Range"), Some("₦300k - ₦600k/month"));
        assert_eq!(report[1].value("Suggested Areas"), Some("Chevron, Ikate, Agungi"));
        assert_eq!(report[2].value("Affordability Score"), Some("39/100"));
        assert_eq!(report[2].value("Monthly Mortgage"), Some("₦150,000"));
    }

    #[test]
    fn predictions_serialize_camel_case() {
        let p = SmartAdvisor::predict(&selections("senior", "ikeja", "minimal")).unwrap();

        let json = serde_json::to_value(&p).unwrap();

        assert!(json.get("propertyType").is_some());
        assert!(json.get("paymentPlans").is_some());
        assert_eq!(json["paymentPlans"]["mortgage"]["term"], 30);
    }
}
