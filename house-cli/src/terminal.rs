//! Plain-text rendering of the wizard.

use std::collections::BTreeMap;
use std::io::Write;

use house_core::WizardView;
use house_core::models::Field;
use house_core::wizard::{Summary, TOTAL_STEPS, required_fields};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const BAR_WIDTH: u32 = 20;

/// Fields shown as chip groups on `step`, required ones first.
pub fn step_fields(step: u8) -> Vec<Field> {
    let mut fields = required_fields(step).to_vec();
    if step == 5 {
        fields.push(Field::Priority);
    }
    fields
}

/// [`WizardView`] that keeps the latest label text and prints a panel for
/// the current step on demand.
pub struct TerminalView<W: Write> {
    out: W,
    step: u8,
    nav: (bool, bool),
    progress: Decimal,
    budget: String,
    down: String,
    bedrooms: String,
    mortgage: String,
    tip: String,
    chips: BTreeMap<String, String>,
    overlay: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            step: 1,
            nav: (false, false),
            progress: Decimal::ZERO,
            budget: String::new(),
            down: String::new(),
            bedrooms: String::new(),
            mortgage: String::new(),
            tip: String::new(),
            chips: BTreeMap::new(),
            overlay: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn is_open(&self) -> bool {
        self.overlay
    }

    fn line(
        &mut self,
        text: &str,
    ) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }

    fn progress_bar(&self) -> String {
        let filled = (self.progress * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or(0)
            .min(BAR_WIDTH);
        format!(
            "[{}{}] {}%",
            "#".repeat(filled as usize),
            "-".repeat((BAR_WIDTH - filled) as usize),
            self.progress.round()
        )
    }

    /// Prints the current step: chip groups, sliders, navigation and tip.
    pub fn print_panel(&mut self) {
        let header = format!("Step {} of {TOTAL_STEPS}  {}", self.step, self.progress_bar());
        self.line("");
        self.line(&header);

        for field in step_fields(self.step) {
            let chosen = self.chips.get(field.as_str()).cloned();
            let chips: Vec<String> = field
                .options()
                .iter()
                .map(|(value, label)| {
                    if chosen.as_deref() == Some(*value) {
                        format!("[*] {value} ({label})")
                    } else {
                        format!("[ ] {value} ({label})")
                    }
                })
                .collect();
            let row = format!("  {field}: {}", chips.join("  "));
            self.line(&row);
        }

        match self.step {
            3 => {
                let text = format!("  budget: {}   bedrooms: {}", self.budget, self.bedrooms);
                self.line(&text);
            }
            4 => {
                let text = format!("  down: {}   est. monthly: {}", self.down, self.mortgage);
                self.line(&text);
            }
            _ => {}
        }

        let (back, next) = self.nav;
        let nav = format!(
            "  {}  {}",
            if back { "<back" } else { "     " },
            if next { "next>" } else { "(complete this step to continue)" }
        );
        self.line(&nav);
        if !self.tip.is_empty() {
            let tip = format!("  {}", self.tip);
            self.line(&tip);
        }
    }
}

impl<W: Write> WizardView for TerminalView<W> {
    fn show_step(
        &mut self,
        step: u8,
    ) {
        self.step = step;
    }

    fn set_nav(
        &mut self,
        can_go_back: bool,
        can_go_next: bool,
    ) {
        self.nav = (can_go_back, can_go_next);
    }

    fn set_progress(
        &mut self,
        pct: Decimal,
    ) {
        self.progress = pct;
    }

    fn set_budget_label(
        &mut self,
        text: &str,
    ) {
        self.budget = text.to_string();
    }

    fn set_down_label(
        &mut self,
        text: &str,
    ) {
        self.down = text.to_string();
    }

    fn set_bedrooms_label(
        &mut self,
        text: &str,
    ) {
        self.bedrooms = text.to_string();
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
        self.chips.insert(field.to_string(), value.to_string());
    }

    fn render_summary(
        &mut self,
        summary: &Summary,
    ) {
        self.line("");
        self.line("== Your Home Assessment ==");
        for card in &summary.cards {
            let title = format!("-- {} --", card.title);
            self.line(&title);
            for text in &card.lines {
                let text = format!("  {text}");
                self.line(&text);
            }
        }
        for section in &summary.report {
            let heading = format!("[{}]", section.heading);
            self.line(&heading);
            for (label, value) in &section.rows {
                let row = format!("  {label}: {value}");
                self.line(&row);
            }
        }
        if let Some(link) = &summary.extras.marketplace_link {
            let text = format!("Browse matching listings: {link}");
            self.line(&text);
        }
        if let Some(block) = summary.extras.checklist {
            let heading = format!("{} ({})", block.heading, block.note);
            self.line(&heading);
            for section in block.sections {
                let title = format!("  {}", section.title);
                self.line(&title);
                for (_, label) in section.items {
                    let item = format!("    - {label}");
                    self.line(&item);
                }
            }
        }
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
        self.overlay = visible;
    }

    fn set_report_date(
        &mut self,
        text: &str,
    ) {
        if self.step == TOTAL_STEPS {
            let line = format!("Generated {text}");
            self.line(&line);
        }
    }

    fn notify(
        &mut self,
        message: &str,
    ) {
        self.line(message);
    }
}
