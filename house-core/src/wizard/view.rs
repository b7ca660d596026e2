use rust_decimal::Decimal;

use super::summary::Summary;

/// Every element the wizard writes to.
///
/// All methods default to doing nothing, so a view without a given element
/// simply skips that update.
#[allow(unused_variables)]
pub trait WizardView {
    /// Make `step` the only visible step.
    fn show_step(
        &mut self,
        step: u8,
    ) {
    }

    fn set_nav(
        &mut self,
        can_go_back: bool,
        can_go_next: bool,
    ) {
    }

    /// Progress bar width in percent.
    fn set_progress(
        &mut self,
        pct: Decimal,
    ) {
    }

    fn set_budget_label(
        &mut self,
        text: &str,
    ) {
    }

    fn set_down_label(
        &mut self,
        text: &str,
    ) {
    }

    fn set_bedrooms_label(
        &mut self,
        text: &str,
    ) {
    }

    fn set_mortgage_label(
        &mut self,
        text: &str,
    ) {
    }

    /// Highlight the chip for `value` in `field`'s group, clearing the rest.
    fn mark_chip(
        &mut self,
        field: &str,
        value: &str,
    ) {
    }

    /// Summary cards, report sections and contributed extras.
    fn render_summary(
        &mut self,
        summary: &Summary,
    ) {
    }

    fn set_tip(
        &mut self,
        tip: &str,
    ) {
    }

    fn set_overlay(
        &mut self,
        visible: bool,
    ) {
    }

    fn scroll_to_top(&mut self) {}

    fn set_report_date(
        &mut self,
        text: &str,
    ) {
    }

    /// Informational message, e.g. after a save.
    fn notify(
        &mut self,
        message: &str,
    ) {
    }
}

/// A view with no elements at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl WizardView for NullView {}
