//! One function per subcommand. Each writes its report to `out`.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::Args;
use house_core::calculations::{
    AdvisorSelections, AdvisorStep, AffordabilityCalculator, AffordabilityInput, AssessmentInput,
    FeeSchedule, FinancialAssessment, Predictions, SmartAdvisor,
};
use house_core::format::{format_naira, format_naira_kobo, format_time_to_goal};
use house_core::input::parse_amount_or_zero;
use house_core::models::{CHECKLIST_SECTIONS, LocationInsights, ReportSection, section};
use house_core::storage::records;
use house_core::wizard::{AgentChannel, AgentContact, ShareAction, ShareTarget};
use house_core::{LocalStore, Wizard, WizardView};

// ── calculator ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Property price in naira, e.g. `50,000,000`.
    #[arg(long)]
    pub price: String,

    /// Down payment percentage.
    #[arg(long, default_value = "20")]
    pub down: String,

    /// Annual interest rate in percent.
    #[arg(long, default_value = "9")]
    pub rate: String,

    /// Loan tenor in years.
    #[arg(long, default_value_t = 20)]
    pub tenor: u32,
}

impl CalcArgs {
    pub fn to_input(&self) -> AffordabilityInput {
        AffordabilityInput {
            price: parse_amount_or_zero(&self.price),
            down_pct: parse_amount_or_zero(&self.down),
            annual_rate_pct: parse_amount_or_zero(&self.rate),
            tenor_years: self.tenor,
        }
    }
}

pub fn calculate(
    out: &mut impl Write,
    fees: &FeeSchedule,
    args: &CalcArgs,
) -> Result<()> {
    let result = AffordabilityCalculator::new(fees).calculate(&args.to_input());

    writeln!(out, "Down payment:      {}", format_naira(result.down_payment))?;
    writeln!(out, "Loan amount:       {}", format_naira(result.loan_amount))?;
    writeln!(out, "Monthly payment:   {}", format_naira(result.monthly_payment))?;
    writeln!(out, "Legal fees:        {}", format_naira(result.fees.legal))?;
    writeln!(out, "Agent fees:        {}", format_naira(result.fees.agent))?;
    writeln!(out, "Stamp duty:        {}", format_naira(result.fees.stamp_duty))?;
    writeln!(out, "Survey:            {}", format_naira(result.fees.survey))?;
    writeln!(out, "Registration:      {}", format_naira(result.fees.registration))?;
    writeln!(out, "Total cost:        {}", format_naira(result.total_cost))?;
    writeln!(out, "Upfront (down + fees): {}", format_naira(result.upfront_total))?;
    Ok(())
}

// ── financial assessment ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct AssessArgs {
    #[arg(long, default_value = "")]
    pub monthly_income: String,
    #[arg(long, default_value = "")]
    pub additional_income: String,
    #[arg(long, default_value = "")]
    pub rent: String,
    #[arg(long, default_value = "")]
    pub utilities: String,
    #[arg(long, default_value = "")]
    pub other_expenses: String,
    #[arg(long, default_value = "")]
    pub current_savings: String,
    #[arg(long, default_value = "")]
    pub monthly_savings: String,
    #[arg(long, default_value = "")]
    pub target_price: String,
}

impl AssessArgs {
    /// Blank or unparseable fields become zero.
    pub fn to_input(&self) -> AssessmentInput {
        AssessmentInput {
            monthly_income: parse_amount_or_zero(&self.monthly_income),
            additional_income: parse_amount_or_zero(&self.additional_income),
            current_rent: parse_amount_or_zero(&self.rent),
            utilities: parse_amount_or_zero(&self.utilities),
            other_expenses: parse_amount_or_zero(&self.other_expenses),
            current_savings: parse_amount_or_zero(&self.current_savings),
            monthly_savings: parse_amount_or_zero(&self.monthly_savings),
            target_price: parse_amount_or_zero(&self.target_price),
        }
    }
}

pub fn assess(
    out: &mut impl Write,
    args: &AssessArgs,
) -> Result<()> {
    let result = FinancialAssessment::evaluate(&args.to_input());

    writeln!(out, "Total income:        {}", format_naira(result.total_income))?;
    writeln!(out, "Total expenses:      {}", format_naira(result.total_expenses))?;
    writeln!(out, "Disposable income:   {}", format_naira(result.disposable_income))?;
    writeln!(out, "Payment capacity:    {}", format_naira_kobo(result.max_monthly_payment))?;
    writeln!(out, "Capacity used:       {}%", result.capacity_pct.round())?;
    writeln!(out, "Down payment needed: {}", format_naira(result.required_down_payment))?;
    writeln!(out, "Savings progress:    {}%", result.down_payment_progress.round())?;
    writeln!(out, "Time to goal:        {}", format_time_to_goal(result.months_to_goal))?;
    writeln!(out)?;
    writeln!(out, "{}", result.recommendation)?;
    for item in result.action_plan() {
        writeln!(out, "  - {item}")?;
    }
    Ok(())
}

// ── location insights ────────────────────────────────────────────────────

pub fn location(
    out: &mut impl Write,
    insights: &LocationInsights,
    id: &str,
) -> Result<()> {
    let Some(text) = insights.lookup(id) else {
        writeln!(out, "No insights available for '{id}'.")?;
        return Ok(());
    };
    writeln!(out, "Safety:         {}", text.safety)?;
    writeln!(out, "Infrastructure: {}", text.infrastructure)?;
    writeln!(out, "Transport:      {}", text.transport)?;
    writeln!(out, "Amenities:      {}", text.amenities)?;
    writeln!(out, "{}", text.description.trim_end())?;
    Ok(())
}

// ── smart advisor ────────────────────────────────────────────────────────

fn print_sections(
    out: &mut impl Write,
    sections: &[ReportSection],
) -> Result<()> {
    for section in sections {
        writeln!(out, "[{}]", section.heading)?;
        for (label, value) in &section.rows {
            writeln!(out, "  {label}: {value}")?;
        }
    }
    Ok(())
}

fn print_predictions(
    out: &mut impl Write,
    selections: &AdvisorSelections,
    predictions: &Predictions,
) -> Result<()> {
    for step in AdvisorStep::ORDER {
        writeln!(out, "You: {}", selections.describe(step))?;
    }
    writeln!(out)?;
    writeln!(out, "Recommended: {}", predictions.property_type_title())?;
    writeln!(out, "Price range: {}", predictions.price_range)?;
    writeln!(
        out,
        "Affordability score: {}/100 ({})",
        predictions.affordability_score,
        predictions.score_band().color()
    )?;
    writeln!(
        out,
        "Growth: {}%  Rental yield: {}%",
        predictions.investment_metrics.growth, predictions.investment_metrics.rental
    )?;
    let plans = &predictions.payment_plans;
    writeln!(
        out,
        "Mortgage: {}/month over {} years",
        format_naira(plans.mortgage.monthly.into()),
        plans.mortgage.term
    )?;
    writeln!(
        out,
        "Installment: {}/month over {} years",
        format_naira(plans.installment.monthly.into()),
        plans.installment.term
    )?;
    writeln!(out)?;
    for (i, step) in predictions.timeline().iter().enumerate() {
        writeln!(out, "{}. {}: {}", i + 1, step.title, step.description)?;
        if let Some(metric) = &step.metric {
            writeln!(out, "   {metric}")?;
        }
    }
    writeln!(out)?;
    print_sections(out, &predictions.report(selections))
}

/// Predicts, stores the profile and optionally appends a saved report.
///
/// Incomplete answers or a location without a fit print a notice instead.
pub async fn advisor_predict(
    out: &mut impl Write,
    store: &dyn LocalStore,
    selections: &AdvisorSelections,
    save_report: bool,
    now: DateTime<Utc>,
) -> Result<Option<Predictions>> {
    if let Some(step) = selections.next_missing() {
        writeln!(out, "{}", step.prompt())?;
        return Ok(None);
    }
    let predictions = match SmartAdvisor::predict(selections) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "advisor produced no recommendation");
            writeln!(out, "No recommendation available: {e}")?;
            return Ok(None);
        }
    };

    records::save_profile(store, selections, &predictions, now).await?;
    print_predictions(out, selections, &predictions)?;

    if save_report {
        let report = records::save_report(store, selections, &predictions, now).await?;
        writeln!(out)?;
        writeln!(out, "Saved \"{}\" (id {})", report.title, report.id)?;
    }
    Ok(Some(predictions))
}

/// Shows the last stored advisor result.
pub async fn advisor_last(
    out: &mut impl Write,
    store: &dyn LocalStore,
) -> Result<()> {
    let profile = records::discard_malformed(records::load_profile(store).await)?;
    match profile {
        Some(records::FinancialProfile {
            selections,
            predictions: Some(predictions),
            ..
        }) => print_predictions(out, &selections, &predictions),
        _ => {
            writeln!(out, "No previous assessment found.")?;
            Ok(())
        }
    }
}

pub async fn reports_list(
    out: &mut impl Write,
    store: &dyn LocalStore,
) -> Result<()> {
    let reports = records::discard_malformed(records::list_reports(store).await)?;
    if reports.is_empty() {
        writeln!(out, "No saved reports.")?;
    }
    for report in reports {
        writeln!(
            out,
            "{}  {}  {} ({})",
            report.id,
            report.title,
            report.predictions.property_type_title(),
            report.predictions.price_range
        )?;
    }
    Ok(())
}

pub async fn report_show(
    out: &mut impl Write,
    store: &dyn LocalStore,
    id: i64,
) -> Result<()> {
    let Some(report) = records::discard_malformed(records::find_report(store, id).await)? else {
        bail!("no saved report with id {id}");
    };
    writeln!(out, "{}", report.title)?;
    print_predictions(out, &report.selections, &report.predictions)
}

pub async fn report_delete(
    out: &mut impl Write,
    store: &dyn LocalStore,
    id: i64,
) -> Result<()> {
    if records::delete_report(store, id).await? {
        writeln!(out, "Deleted report {id}.")?;
    } else {
        writeln!(out, "No saved report with id {id}.")?;
    }
    Ok(())
}

// ── checklist ────────────────────────────────────────────────────────────

pub async fn checklist_show(
    out: &mut impl Write,
    store: &dyn LocalStore,
) -> Result<()> {
    let checklist = records::discard_malformed(records::load_checklist(store).await)?.unwrap_or_default();

    for sec in CHECKLIST_SECTIONS {
        writeln!(out, "{} ({}%)", sec.title, checklist.progress(sec).round())?;
        for (id, label) in sec.items {
            let mark = if checklist.is_checked(sec.id, id) { "x" } else { " " };
            writeln!(out, "  [{mark}] {}/{id}  {label}", sec.id)?;
        }
    }
    Ok(())
}

pub async fn checklist_toggle(
    out: &mut impl Write,
    store: &dyn LocalStore,
    category: &str,
    item: &str,
) -> Result<()> {
    let Some(sec) = section(category) else {
        bail!("unknown checklist section '{category}'");
    };
    if !sec.items.iter().any(|(id, _)| *id == item) {
        bail!("'{item}' is not an item of '{category}'");
    }

    let checklist = records::toggle_checklist_item(store, category, item).await?;
    let state = if checklist.is_checked(category, item) { "checked" } else { "unchecked" };
    writeln!(
        out,
        "{category}/{item} {state}; {} is {}% done",
        sec.title,
        checklist.progress(sec).round()
    )?;
    Ok(())
}

// ── sharing ──────────────────────────────────────────────────────────────

pub fn share(
    out: &mut impl Write,
    target: ShareTarget,
    page_url: &str,
) -> Result<()> {
    match house_core::wizard::share::share(target, page_url) {
        ShareAction::Open(link) => writeln!(out, "Open: {link}")?,
        ShareAction::Navigate(link) => writeln!(out, "Go to: {link}")?,
        ShareAction::CopyToClipboard(text) => writeln!(out, "Copy: {text}")?,
    }
    Ok(())
}

/// Prints the agent message for the saved wizard state and the link that
/// sends it.
pub fn agent<V: WizardView>(
    out: &mut impl Write,
    wizard: &Wizard<V>,
    channel: AgentChannel,
    contact: &AgentContact,
) -> Result<()> {
    writeln!(out, "{}", wizard.agent_message(contact))?;
    writeln!(out)?;
    writeln!(out, "{}", wizard.agent_link(channel, contact))?;
    Ok(())
}
