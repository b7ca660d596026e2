//! Agent hand-off and share links.

use rust_decimal::Decimal;

use super::state::WizardState;
use crate::format::format_naira;
use crate::models::Field;

pub const AGENT_EMAIL: &str = "agent@igethouse.com";
const AGENT_SUBJECT: &str = "iGetHouse Assessment";
const SHARE_SUBJECT: &str = "Property Assessment Report";

/// Contact details typed into the agent form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl AgentContact {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Plain-text summary sent to an agent.
pub fn agent_message(
    state: &WizardState,
    monthly: &str,
    contact: &AgentContact,
) -> String {
    let c = contact.trimmed();
    let pretty = |field: Field| field.pretty(state.selection(field));

    [
        "iGetHouse Assessment".to_string(),
        format!("Name: {}", c.name),
        format!("Email: {}", c.email),
        format!("Phone: {}", c.phone),
        format!("Location: {}", pretty(Field::Location)),
        format!(
            "Type: {} ({} beds)",
            pretty(Field::PropertyType),
            state.bedrooms
        ),
        format!("Budget: {}", format_naira(Decimal::from(state.budget))),
        format!(
            "Payment: {} (Down {}%)",
            pretty(Field::PaymentMethod),
            state.down_pct
        ),
        format!("Est. Monthly: {monthly}"),
        format!(
            "Lifestyle: {} | Priority: {}",
            pretty(Field::Lifestyle),
            pretty(Field::Priority)
        ),
        format!("Timeframe: {}", pretty(Field::Timeframe)),
        format!("Notes: {}", c.notes),
    ]
    .join("\n")
}

/// How the agent summary is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentChannel {
    WhatsApp,
    Email,
}

impl AgentChannel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "whatsapp" => Some(Self::WhatsApp),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    /// Deep link carrying `message`.
    pub fn link(
        &self,
        message: &str,
    ) -> String {
        match self {
            Self::WhatsApp => whatsapp_link(message),
            Self::Email => format!(
                "mailto:{AGENT_EMAIL}?subject={}&body={}",
                urlencoding::encode(AGENT_SUBJECT),
                urlencoding::encode(message)
            ),
        }
    }
}

fn whatsapp_link(text: &str) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(text))
}

/// Where the current page link is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Email,
    Copy,
}

impl ShareTarget {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "whatsapp" => Some(Self::WhatsApp),
            "email" => Some(Self::Email),
            "copy" => Some(Self::Copy),
            _ => None,
        }
    }
}

/// What the front end should do with a share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Open the link in a new window.
    Open(String),
    /// Navigate the current window to the link.
    Navigate(String),
    /// Put the text on the clipboard.
    CopyToClipboard(String),
}

pub fn share(
    target: ShareTarget,
    page_url: &str,
) -> ShareAction {
    match target {
        ShareTarget::WhatsApp => ShareAction::Open(whatsapp_link(page_url)),
        ShareTarget::Email => ShareAction::Navigate(format!(
            "mailto:?subject={}&body={}",
            urlencoding::encode(SHARE_SUBJECT),
            urlencoding::encode(page_url)
        )),
        ShareTarget::Copy => ShareAction::CopyToClipboard(page_url.to_string()),
    }
}
