mod checklist;
mod location;
pub mod market;
mod report;
mod selection;

pub use checklist::{BuyerChecklist, CHECKLIST_SECTIONS, ChecklistSection, section};
pub use location::{
    AreaProfile, BasicInsights, ExtendedInsights, InsightProvider, LocationInsights, LocationText,
    stars,
};
pub use market::MarketEntry;
pub use report::{ReportSection, SummaryCard};
pub use selection::Field;
