use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A titled group of checklist items, each `(id, label)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSection {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [(&'static str, &'static str)],
}

pub const CHECKLIST_SECTIONS: &[ChecklistSection] = &[
    ChecklistSection {
        id: "financial",
        title: "Financial",
        items: &[
            ("budget-range", "Define budget range"),
            ("down-payment", "Plan 20% down payment"),
            (
                "extra-costs",
                "Calculate extra costs (legal, agent, stamp duty, survey, moving)",
            ),
        ],
    },
    ChecklistSection {
        id: "location",
        title: "Location",
        items: &[
            ("security", "Check crime/security"),
            ("commute", "Assess commute & access"),
            ("flood-risk", "Check flood/erosion risk"),
            ("nearby-services", "Near schools/hospitals/markets"),
        ],
    },
    ChecklistSection {
        id: "inspection",
        title: "Inspection",
        items: &[
            ("structure", "Structure (roof/walls/foundation)"),
            ("electrical", "Electrical & breakers"),
            ("plumbing", "Plumbing & pressure"),
            ("drainage", "Drainage & sewage"),
        ],
    },
    ChecklistSection {
        id: "legal",
        title: "Legal",
        items: &[
            ("title-documents", "C of O / Consent / Deed"),
            ("survey-plan", "Survey plan matches"),
            ("building-approval", "Building plan approval"),
            ("no-liens", "No liens/disputes"),
        ],
    },
];

/// Look up a declared section by id.
pub fn section(id: &str) -> Option<&'static ChecklistSection> {
    CHECKLIST_SECTIONS.iter().find(|s| s.id == id)
}

/// Checked state of every item the buyer has touched, keyed by category
/// then item id. Untouched items count as unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuyerChecklist {
    categories: BTreeMap<String, BTreeMap<String, bool>>,
}

impl BuyerChecklist {
    /// Flips one item and returns its new state.
    pub fn toggle(
        &mut self,
        category: &str,
        item: &str,
    ) -> bool {
        let slot = self
            .categories
            .entry(category.to_string())
            .or_default()
            .entry(item.to_string())
            .or_insert(false);
        *slot = !*slot;
        *slot
    }

    pub fn is_checked(
        &self,
        category: &str,
        item: &str,
    ) -> bool {
        self.categories
            .get(category)
            .and_then(|items| items.get(item))
            .copied()
            .unwrap_or(false)
    }

    /// Percentage of `section`'s declared items that are checked.
    pub fn progress(
        &self,
        section: &ChecklistSection,
    ) -> Decimal {
        if section.items.is_empty() {
            return Decimal::ZERO;
        }
        let checked = section
            .items
            .iter()
            .filter(|(id, _)| self.is_checked(section.id, id))
            .count();
        Decimal::from(checked as u64) / Decimal::from(section.items.len() as u64)
            * Decimal::ONE_HUNDRED
    }
}
