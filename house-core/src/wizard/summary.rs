//! Summary cards and the printable report built on the final step.
//!
//! Both are pure projections of [`WizardState`] and the static tables. After
//! the base projection is built, each registered [`SummaryContributor`] may
//! add extras to it.

use rust_decimal::Decimal;
use url::Url;

use super::config::WizardConfig;
use super::state::WizardState;
use crate::format::format_naira;
use crate::models::market::{price_range_text, suggested_areas};
use crate::models::{CHECKLIST_SECTIONS, ChecklistSection, Field, ReportSection, SummaryCard};

pub const MARKETPLACE_URL: &str = "https://igethouse.com/marketplace/search";

const NO_AREAS: &[&str] = &["Discuss with advisor"];

/// Everything rendered on the report step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub cards: Vec<SummaryCard>,
    pub report: Vec<ReportSection>,
    pub extras: SummaryExtras,
}

/// Blocks added by contributors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryExtras {
    pub marketplace_link: Option<String>,
    pub checklist: Option<ChecklistBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistBlock {
    pub heading: &'static str,
    pub note: &'static str,
    pub sections: &'static [ChecklistSection],
}

/// Extension point invoked after the base summary is built.
pub trait SummaryContributor: Send + Sync {
    fn name(&self) -> &'static str;

    fn contribute(
        &self,
        state: &WizardState,
        summary: &mut Summary,
    );
}

fn areas_text(location: Option<&str>) -> String {
    location
        .and_then(suggested_areas)
        .unwrap_or(NO_AREAS)
        .join(", ")
}

impl Summary {
    /// Base projection of `state`. `monthly` is the displayed mortgage
    /// estimate.
    pub fn build(
        state: &WizardState,
        config: &WizardConfig,
        monthly: &str,
    ) -> Self {
        Self {
            cards: summary_cards(state, monthly),
            report: report_sections(state, config, monthly),
            extras: SummaryExtras::default(),
        }
    }
}

fn summary_cards(
    state: &WizardState,
    monthly: &str,
) -> Vec<SummaryCard> {
    let pretty = |field: Field| field.pretty(state.selection(field));
    let location = state.selection(Field::Location);
    let price_range = price_range_text(
        location,
        state.selection(Field::PropertyType),
        Decimal::from(state.budget),
    );

    vec![
        SummaryCard::new(
            "Buyer Profile",
            [pretty(Field::BuyerType), pretty(Field::Salary)],
        ),
        SummaryCard::new(
            "Location",
            [
                pretty(Field::Location),
                format!("Suggested: {}", areas_text(location)),
            ],
        ),
        SummaryCard::new(
            "Property",
            [
                format!("Type: {}", pretty(Field::PropertyType)),
                format!("{} bedrooms", state.bedrooms),
                format!("Target: {}", format_naira(Decimal::from(state.budget))),
                format!("Market Range: {price_range}"),
            ],
        ),
        SummaryCard::new(
            "Financing",
            [
                format!("Method: {}", pretty(Field::PaymentMethod)),
                format!("Down Payment: {}%", state.down_pct),
                format!("Est. Monthly: {monthly}"),
            ],
        ),
        SummaryCard::new(
            "Lifestyle & Priorities",
            [
                pretty(Field::Lifestyle),
                format!("Priority: {}", pretty(Field::Priority)),
                format!("Timeframe: {}", pretty(Field::Timeframe)),
            ],
        ),
        SummaryCard::new(
            "Next Steps",
            [
                "Verify titles (C of O / Consent)",
                "Legal + survey checks",
                "Physical inspection",
                "Secure payment & documentation",
            ],
        ),
    ]
}

fn report_sections(
    state: &WizardState,
    config: &WizardConfig,
    monthly: &str,
) -> Vec<ReportSection> {
    let pretty = |field: Field| field.pretty(state.selection(field));
    let location = state.selection(Field::Location);
    let budget = Decimal::from(state.budget);

    vec![
        ReportSection::new(
            "Profile Summary",
            [
                ("Buyer Type", pretty(Field::BuyerType)),
                ("Income Range", pretty(Field::Salary)),
                ("Timeframe", pretty(Field::Timeframe)),
            ],
        ),
        ReportSection::new(
            "Location & Areas",
            [
                ("Preferred Location", pretty(Field::Location)),
                ("Suggested Areas", areas_text(location)),
            ],
        ),
        ReportSection::new(
            "Property Target",
            [
                ("Type", pretty(Field::PropertyType)),
                ("Bedrooms", state.bedrooms.to_string()),
                ("Target Price", format_naira(budget)),
                (
                    "Market Range",
                    price_range_text(location, state.selection(Field::PropertyType), budget),
                ),
            ],
        ),
        ReportSection::new(
            "Financing Plan",
            [
                ("Payment Method", pretty(Field::PaymentMethod)),
                ("Down Payment", format!("{}%", state.down_pct)),
                ("Estimated Monthly", monthly.to_string()),
                ("Tenor", format!("{} years", config.mortgage_years)),
                ("Rate", format!("{}% APR", config.mortgage_rate_pct.normalize())),
            ],
        ),
        ReportSection::new(
            "Lifestyle & Priorities",
            [
                ("Lifestyle", pretty(Field::Lifestyle)),
                ("Priority", pretty(Field::Priority)),
            ],
        ),
        ReportSection::new(
            "Action Checklist",
            [
                ("1", "Verify titles (C of O / Consent)"),
                ("2", "Legal + survey checks"),
                ("3", "Physical inspection + utilities"),
                ("4", "Secure payment & documents"),
            ],
        ),
    ]
}

// ── contributors ─────────────────────────────────────────────────────────

/// Adds a marketplace search link for the chosen location, type and budget.
#[derive(Debug, Clone)]
pub struct MarketplaceLink {
    base: String,
}

impl MarketplaceLink {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Search URL with only the parameters that are known.
    pub fn url_for(
        &self,
        location: Option<&str>,
        property_type: Option<&str>,
        budget: i64,
    ) -> Result<Url, url::ParseError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(loc) = location {
            params.push(("location", loc.to_string()));
        }
        if let Some(ty) = property_type {
            params.push(("type", ty.to_string()));
        }
        if budget != 0 {
            params.push(("maxPrice", budget.to_string()));
        }
        Url::parse_with_params(&self.base, params)
    }
}

impl Default for MarketplaceLink {
    fn default() -> Self {
        Self::new(MARKETPLACE_URL)
    }
}

impl SummaryContributor for MarketplaceLink {
    fn name(&self) -> &'static str {
        "marketplace-link"
    }

    fn contribute(
        &self,
        state: &WizardState,
        summary: &mut Summary,
    ) {
        match self.url_for(
            state.selection(Field::Location),
            state.selection(Field::PropertyType),
            state.budget,
        ) {
            Ok(url) => summary.extras.marketplace_link = Some(url.into()),
            Err(e) => tracing::warn!(base = %self.base, error = %e, "skipping marketplace link"),
        }
    }
}

/// Adds the personalized purchase checklist.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalizedChecklist;

impl SummaryContributor for PersonalizedChecklist {
    fn name(&self) -> &'static str {
        "personalized-checklist"
    }

    fn contribute(
        &self,
        _state: &WizardState,
        summary: &mut Summary,
    ) {
        summary.extras.checklist = Some(ChecklistBlock {
            heading: "Personalized Checklist",
            note: "Auto-generated from your assessment.",
            sections: CHECKLIST_SECTIONS,
        });
    }
}

/// The contributors every wizard gets by default.
pub fn default_contributors() -> Vec<Box<dyn SummaryContributor>> {
    vec![
        Box::new(MarketplaceLink::default()),
        Box::new(PersonalizedChecklist),
    ]
}
