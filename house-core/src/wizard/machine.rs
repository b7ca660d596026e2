use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::config::WizardConfig;
use super::share::{AgentChannel, AgentContact, agent_message};
use super::snapshot::{PartialSnapshot, WizardSnapshot};
use super::state::{REPORT_STEP, WizardState, tip};
use super::summary::{Summary, SummaryContributor};
use super::view::{NullView, WizardView};
use crate::calculations::amortization::monthly_payment;
use crate::calculations::common::{round_to_nearest, round_whole};
use crate::format::format_naira;
use crate::models::Field;
use crate::storage::{LocalStore, PersistError, records};

const PAYMENT_STEP: u8 = 4;
const LIFESTYLE_STEP: u8 = 5;

/// Average monthly income assumed for each salary chip.
const SALARY_INCOME: &[(&str, i64)] = &[
    ("150000-300000", 225_000),
    ("300000-600000", 450_000),
    ("600000-1200000", 900_000),
    (">1200000", 1_500_000),
];

/// The six-step assessment flow.
///
/// Owns its state exclusively. Every mutation goes through a method here,
/// which then pushes the affected text to the view.
pub struct Wizard<V: WizardView = NullView> {
    config: WizardConfig,
    state: WizardState,
    view: V,
    visible: bool,
    contributors: Vec<Box<dyn SummaryContributor>>,
    summary: Option<Summary>,
}

impl<V: WizardView> Wizard<V> {
    /// A wizard at step 1 with default state.
    pub fn new(
        config: WizardConfig,
        view: V,
    ) -> Self {
        let state = WizardState::new(&config);
        Self::with_state(config, view, state)
    }

    fn with_state(
        config: WizardConfig,
        view: V,
        state: WizardState,
    ) -> Self {
        let mut wizard = Self {
            config,
            state,
            view,
            visible: false,
            contributors: Vec::new(),
            summary: None,
        };
        wizard.sync_view();
        wizard.render();
        wizard
    }

    /// A wizard restored from a loaded snapshot.
    ///
    /// An absent snapshot gives the default state. A load error is logged
    /// and also gives the default state.
    pub fn restore(
        config: WizardConfig,
        view: V,
        loaded: Result<Option<PartialSnapshot>, PersistError>,
    ) -> Self {
        let defaults = WizardState::new(&config);
        let state = match loaded {
            Ok(Some(snapshot)) => {
                let state = snapshot.merge_over(defaults, &config);
                tracing::info!(
                    step = state.step,
                    selections = state.selections.len(),
                    "wizard state restored"
                );
                state
            }
            Ok(None) => {
                tracing::debug!("no saved wizard state");
                defaults
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring saved wizard state; using defaults");
                defaults
            }
        };
        Self::with_state(config, view, state)
    }

    /// Loads the snapshot from `store` and restores from it.
    pub async fn load(
        config: WizardConfig,
        view: V,
        store: &dyn LocalStore,
    ) -> Self {
        let loaded = records::load_snapshot(store).await;
        Self::restore(config, view, loaded)
    }

    pub fn add_contributor(
        &mut self,
        contributor: Box<dyn SummaryContributor>,
    ) {
        tracing::debug!(contributor = contributor.name(), "summary contributor added");
        self.contributors.push(contributor);
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The summary built on the most recent arrival at the report step.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    // ── transitions ──────────────────────────────────────────────────────

    /// Records a chip choice.
    pub fn select_chip(
        &mut self,
        field: Field,
        value: &str,
    ) {
        self.state
            .selections
            .insert(field.as_str().to_string(), value.to_string());
        self.view.mark_chip(field.as_str(), value);
        tracing::debug!(field = field.as_str(), value, "chip selected");

        if field == Field::Salary {
            self.predict_budget();
        }
        self.update_nav();

        if field == Field::PaymentMethod
            && self.config.auto_advance_on_payment_method
            && self.state.step == PAYMENT_STEP
        {
            self.next();
        }
    }

    /// Moves forward one step. Returns `false`, changing nothing, when the
    /// current step is incomplete or already the last.
    pub fn next(&mut self) -> bool {
        if !self.state.can_go_next() {
            tracing::debug!(
                step = self.state.step,
                missing = ?self.state.missing_fields(),
                "next ignored"
            );
            return false;
        }

        self.state.step += 1;
        tracing::debug!(step = self.state.step, "wizard advanced");
        self.render();

        if self.state.step == REPORT_STEP {
            self.build_summary();
        }
        true
    }

    /// Moves back one step. Selections are kept.
    pub fn prev(&mut self) -> bool {
        if !self.state.can_go_back() {
            return false;
        }
        self.state.step -= 1;
        tracing::debug!(step = self.state.step, "wizard went back");
        self.render();
        true
    }

    /// Shows the wizard at step 1, keeping any restored selections.
    pub fn open(&mut self) {
        self.visible = true;
        self.state.step = 1;
        self.view.set_overlay(true);
        tracing::debug!("wizard opened");
        self.render();
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.view.set_overlay(false);
        tracing::debug!("wizard closed");
    }

    pub fn finish(&mut self) {
        self.close();
        self.view.scroll_to_top();
    }

    // ── sliders ──────────────────────────────────────────────────────────

    pub fn set_budget(
        &mut self,
        budget: i64,
    ) {
        self.state.budget = self.config.clamp_budget(budget);
        self.view
            .set_budget_label(&format_naira(Decimal::from(self.state.budget)));
        self.update_mortgage();
    }

    pub fn set_down_pct(
        &mut self,
        pct: u8,
    ) {
        self.state.down_pct = pct.min(100);
        self.view
            .set_down_label(&format!("{}%", self.state.down_pct));
        self.update_mortgage();
    }

    pub fn set_bedrooms(
        &mut self,
        bedrooms: u8,
    ) {
        self.state.bedrooms = self.config.clamp_bedrooms(i64::from(bedrooms));
        self.view
            .set_bedrooms_label(&self.state.bedrooms.to_string());
    }

    // ── derived figures ──────────────────────────────────────────────────

    /// Sets the budget from the salary selection and returns it.
    ///
    /// Income × housing share × 12 × affordability years, rounded to the
    /// configured unit and clamped to the slider bounds. Does nothing
    /// without a salary.
    pub fn predict_budget(&mut self) -> Option<i64> {
        let salary = self.state.selection(Field::Salary)?;
        let income = SALARY_INCOME
            .iter()
            .find(|(bracket, _)| salary.contains(bracket))
            .map_or(self.config.fallback_monthly_income, |(_, income)| *income);

        let capacity = Decimal::from(income) * self.config.housing_share;
        let afford = capacity * Decimal::from(12 * self.config.affordability_years);
        let rounded = round_to_nearest(afford, self.config.budget_rounding);
        let predicted = self
            .config
            .clamp_budget(rounded.to_i64().unwrap_or(self.config.budget_max));

        tracing::debug!(salary, income, predicted, "budget predicted from salary");
        self.set_budget(predicted);
        Some(predicted)
    }

    /// Monthly payment on the financed part of the budget, whole naira.
    pub fn mortgage_estimate(&self) -> Decimal {
        let payment = monthly_payment(
            self.state.financed_amount(),
            self.config.mortgage_rate_pct,
            self.config.mortgage_years,
        );
        round_whole(payment)
    }

    pub fn mortgage_text(&self) -> String {
        format_naira(self.mortgage_estimate())
    }

    /// Base summary plus everything the contributors add.
    pub fn build_summary(&mut self) -> &Summary {
        let mut summary = Summary::build(&self.state, &self.config, &self.mortgage_text());
        for contributor in &self.contributors {
            contributor.contribute(&self.state, &mut summary);
        }
        self.view.render_summary(&summary);
        tracing::debug!(
            cards = summary.cards.len(),
            sections = summary.report.len(),
            "summary built"
        );
        self.summary.insert(summary)
    }

    // ── persistence and hand-off ─────────────────────────────────────────

    /// Overwrites the stored snapshot with the current state.
    pub async fn save(
        &mut self,
        store: &dyn LocalStore,
        saved_at: DateTime<Utc>,
    ) -> Result<WizardSnapshot, PersistError> {
        let snapshot = WizardSnapshot {
            state: self.state.clone(),
            saved_at,
        };
        records::save_snapshot(store, &snapshot).await?;
        self.view.notify("Assessment saved locally.");
        Ok(snapshot)
    }

    pub fn agent_message(
        &self,
        contact: &AgentContact,
    ) -> String {
        agent_message(&self.state, &self.mortgage_text(), contact)
    }

    /// Deep link that sends the agent message over `channel`.
    pub fn agent_link(
        &self,
        channel: AgentChannel,
        contact: &AgentContact,
    ) -> String {
        channel.link(&self.agent_message(contact))
    }

    // ── view sync ────────────────────────────────────────────────────────

    fn update_mortgage(&mut self) {
        let text = self.mortgage_text();
        self.view.set_mortgage_label(&text);
    }

    fn apply_default_lifestyle(&mut self) {
        if self.state.step != LIFESTYLE_STEP || self.state.selection(Field::Lifestyle).is_some() {
            return;
        }
        if let Some(lifestyle) = self.config.default_lifestyle.clone() {
            tracing::debug!(lifestyle = %lifestyle, "default lifestyle applied");
            self.state
                .selections
                .insert(Field::Lifestyle.as_str().to_string(), lifestyle.clone());
            self.view.mark_chip(Field::Lifestyle.as_str(), &lifestyle);
        }
    }

    fn update_nav(&mut self) {
        self.apply_default_lifestyle();
        self.view
            .set_nav(self.state.can_go_back(), self.state.can_go_next());
        self.view.set_progress(self.state.progress_pct());
    }

    fn render(&mut self) {
        self.view.show_step(self.state.step);
        self.update_nav();
        if self.state.step == PAYMENT_STEP {
            self.update_mortgage();
        }
        self.view.set_tip(tip(self.state.step).unwrap_or_default());
        self.view
            .set_report_date(&chrono::Local::now().format("%d/%m/%Y, %H:%M:%S").to_string());
    }

    /// Pushes selections and slider values to a freshly attached view.
    fn sync_view(&mut self) {
        for (field, value) in &self.state.selections {
            self.view.mark_chip(field, value);
        }
        self.view
            .set_budget_label(&format_naira(Decimal::from(self.state.budget)));
        self.view
            .set_down_label(&format!("{}%", self.state.down_pct));
        self.view
            .set_bedrooms_label(&self.state.bedrooms.to_string());
        self.update_mortgage();
    }
}

impl Wizard<NullView> {
    /// A wizard with no view attached.
    pub fn headless(config: WizardConfig) -> Self {
        Self::new(config, NullView)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::records::SNAPSHOT_KEY;
    use crate::wizard::summary::default_contributors;

    /// Records the calls the wizard makes.
    #[derive(Default)]
    struct RecordingView {
        steps: Vec<u8>,
        nav: Option<(bool, bool)>,
        mortgage: String,
        budget: String,
        chips: Vec<(String, String)>,
        overlay: Option<bool>,
        scrolled: bool,
        summaries: usize,
        tip: String,
    }

    impl WizardView for RecordingView {
        fn show_step(
            &mut self,
            step: u8,
        ) {
            self.steps.push(step);
        }

        fn set_nav(
            &mut self,
            can_go_back: bool,
            can_go_next: bool,
        ) {
            self.nav = Some((can_go_back, can_go_next));
        }

        fn set_budget_label(
            &mut self,
            text: &str,
        ) {
            self.budget = text.to_string();
        }

        fn set_mortgage_label(
            &mut self,
            text: &str,
        ) {
            self.mortgage = text.to_string();
        }

        fn mark_chip(
            &mut self,
            field: &str,
            value: &str,
        ) {
            self.chips.push((field.to_string(), value.to_string()));
        }

        fn render_summary(
            &mut self,
            _summary: &Summary,
        ) {
            self.summaries += 1;
        }

        fn set_tip(
            &mut self,
            tip: &str,
        ) {
            self.tip = tip.to_string();
        }

        fn set_overlay(
            &mut self,
            visible: bool,
        ) {
            self.overlay = Some(visible);
        }

        fn scroll_to_top(&mut self) {
            self.scrolled = true;
        }
    }

    fn wizard() -> Wizard<RecordingView> {
        Wizard::new(WizardConfig::default(), RecordingView::default())
    }

    fn complete_steps(
        w: &mut Wizard<RecordingView>,
        through: u8,
    ) {
        let picks: &[(u8, Field, &str)] = &[
            (1, Field::BuyerType, "first_time"),
            (1, Field::Salary, "300000-600000"),
            (2, Field::Location, "lekki"),
            (3, Field::PropertyType, "flat"),
            (4, Field::PaymentMethod, "mortgage"),
            (5, Field::Lifestyle, "moderate"),
            (5, Field::Timeframe, "3-6m"),
        ];
        for step in 1..=through {
            for (_, field, value) in picks.iter().filter(|(s, _, _)| *s == step) {
                w.select_chip(*field, value);
            }
            assert!(w.next(), "could not leave step {step}");
        }
    }

    // =========================================================================
    // navigation
    // =========================================================================

    #[test]
    fn next_is_noop_until_step_complete() {
        let mut w = wizard();
        w.select_chip(Field::BuyerType, "investor");
        let before = w.state().clone();

        assert!(!w.next());
        assert_eq!(w.state(), &before);
        assert_eq!(w.view().nav, Some((false, false)));
    }

    #[test]
    fn selecting_required_fields_enables_next() {
        let mut w = wizard();
        w.select_chip(Field::BuyerType, "investor");
        w.select_chip(Field::Salary, "150000-300000");

        assert_eq!(w.view().nav, Some((false, true)));
        assert!(w.next());
        assert_eq!(w.state().step, 2);
        assert_eq!(w.view().tip, tip(2).unwrap());
    }

    #[test]
    fn prev_keeps_selections_and_stops_at_one() {
        let mut w = wizard();
        complete_steps(&mut w, 2);

        assert!(w.prev());
        assert!(w.prev());
        assert!(!w.prev());
        assert_eq!(w.state().step, 1);
        assert_eq!(w.state().selection(Field::Location), Some("lekki"));
    }

    #[test]
    fn reaching_report_step_builds_summary_once() {
        let mut w = wizard();
        w.add_contributor(Box::new(crate::wizard::summary::PersonalizedChecklist));
        complete_steps(&mut w, 5);

        assert_eq!(w.state().step, 6);
        assert_eq!(w.view().summaries, 1);
        assert!(!w.next());
        let summary = w.summary().unwrap();
        assert!(summary.extras.checklist.is_some());
        assert_eq!(summary.extras.marketplace_link, None);
    }

    #[test]
    fn open_resets_step_but_not_selections() {
        let mut w = wizard();
        complete_steps(&mut w, 3);

        w.open();

        assert!(w.is_visible());
        assert_eq!(w.state().step, 1);
        assert_eq!(w.state().selections.len(), 4);
        assert_eq!(w.view().overlay, Some(true));
    }

    #[test]
    fn finish_hides_and_scrolls() {
        let mut w = wizard();
        w.open();

        w.finish();

        assert!(!w.is_visible());
        assert!(w.view().scrolled);
        assert_eq!(w.view().overlay, Some(false));
    }

    // =========================================================================
    // budget and mortgage
    // =========================================================================

    #[test]
    fn salary_selection_predicts_budget() {
        let mut w = wizard();

        w.select_chip(Field::Salary, "300000-600000");

        // 450,000 × 0.33 × 12 × 25 = 44,550,000 -> 44,600,000
        assert_eq!(w.state().budget, 44_600_000);
        assert_eq!(w.view().budget, "₦44,600,000");
    }

    #[test]
    fn prediction_is_idempotent() {
        let mut w = wizard();
        w.select_chip(Field::Salary, ">1200000");

        let first = w.predict_budget();
        let second = w.predict_budget();

        assert_eq!(first, second);
        assert_eq!(first, Some(148_500_000));
    }

    #[test]
    fn unknown_salary_uses_fallback_income() {
        let mut w = wizard();

        w.select_chip(Field::Salary, "negotiable");

        // 300,000 × 0.33 × 300 = 29,700,000
        assert_eq!(w.state().budget, 29_700_000);
    }

    #[test]
    fn predict_without_salary_does_nothing() {
        let mut w = wizard();

        assert_eq!(w.predict_budget(), None);
        assert_eq!(w.state().budget, 35_000_000);
    }

    #[test]
    fn mortgage_on_default_state() {
        let w = wizard();

        // 28,000,000 financed at 9% over 30 years
        assert_eq!(w.mortgage_estimate(), dec!(225294));
        assert_eq!(w.view().mortgage, "₦225,294");
    }

    #[test]
    fn full_down_payment_means_no_mortgage() {
        let mut w = wizard();

        w.set_down_pct(100);

        assert_eq!(w.mortgage_estimate(), Decimal::ZERO);
    }

    #[test]
    fn higher_down_payment_never_raises_mortgage() {
        let mut w = wizard();
        let mut last = w.mortgage_estimate();
        for pct in (0..=100).step_by(5) {
            w.set_down_pct(pct);
            let now = w.mortgage_estimate();
            assert!(now <= last || pct == 0, "mortgage rose at {pct}%");
            last = now;
        }
    }

    #[test]
    fn sliders_clamp() {
        let mut w = wizard();

        w.set_budget(1);
        w.set_down_pct(140);
        w.set_bedrooms(0);

        assert_eq!(w.state().budget, 5_000_000);
        assert_eq!(w.state().down_pct, 100);
        assert_eq!(w.state().bedrooms, 1);
    }

    // =========================================================================
    // optional behaviours
    // =========================================================================

    #[test]
    fn payment_method_auto_advances_when_enabled() {
        let config = WizardConfig {
            auto_advance_on_payment_method: true,
            ..WizardConfig::default()
        };
        let mut w = Wizard::new(config, RecordingView::default());
        complete_steps(&mut w, 3);

        w.select_chip(Field::PaymentMethod, "cash");

        assert_eq!(w.state().step, 5);
    }

    #[test]
    fn payment_method_waits_for_next_by_default() {
        let mut w = wizard();
        complete_steps(&mut w, 3);

        w.select_chip(Field::PaymentMethod, "cash");

        assert_eq!(w.state().step, 4);
    }

    #[test]
    fn default_lifestyle_fills_step_five() {
        let config = WizardConfig {
            default_lifestyle: Some("moderate".to_string()),
            ..WizardConfig::default()
        };
        let mut w = Wizard::new(config, RecordingView::default());
        complete_steps(&mut w, 4);

        assert_eq!(w.state().selection(Field::Lifestyle), Some("moderate"));
        w.select_chip(Field::Timeframe, "0-3m");
        assert!(w.next());
    }

    // =========================================================================
    // persistence
    // =========================================================================

    #[tokio::test]
    async fn save_then_load_restores_state() {
        let store = MemoryStore::new();
        let mut w = wizard();
        complete_steps(&mut w, 2);
        w.set_bedrooms(4);

        w.save(&store, Utc::now()).await.unwrap();
        let restored = Wizard::load(WizardConfig::default(), RecordingView::default(), &store).await;

        assert_eq!(restored.state(), w.state());
        assert!(
            restored
                .view()
                .chips
                .contains(&("location".to_string(), "lekki".to_string()))
        );
    }

    #[tokio::test]
    async fn corrupt_snapshot_gives_default_state() {
        let store = MemoryStore::with_entries([(SNAPSHOT_KEY, "{\"step\": \"three\"")]);

        let restored = Wizard::load(WizardConfig::default(), NullView, &store).await;

        assert_eq!(restored.state(), Wizard::headless(WizardConfig::default()).state());
    }

    #[tokio::test]
    async fn out_of_range_step_gives_default_state() {
        let store = MemoryStore::with_entries([(SNAPSHOT_KEY, r#"{"step": 12, "total": 6}"#)]);

        let restored = Wizard::load(WizardConfig::default(), NullView, &store).await;

        assert_eq!(restored.state().step, 1);
    }

    #[test]
    fn agent_link_uses_current_estimate() {
        let w = Wizard::headless(WizardConfig::default());

        let link = w.agent_link(AgentChannel::WhatsApp, &AgentContact::default());

        assert!(link.starts_with("https://wa.me/?text=iGetHouse%20Assessment"));
        assert!(link.contains(&*urlencoding::encode("Est. Monthly: ₦225,294")));
    }

    #[test]
    fn default_contributors_fill_extras() {
        let mut w = wizard();
        for c in default_contributors() {
            w.add_contributor(c);
        }
        complete_steps(&mut w, 5);

        let extras = &w.summary().unwrap().extras;
        assert!(extras.marketplace_link.is_some());
        assert!(extras.checklist.is_some());
    }
}
