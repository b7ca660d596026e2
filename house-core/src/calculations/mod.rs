//! Closed-form calculations behind the calculator, the financial assessment
//! form, and the smart advisor.
//!
//! Everything in here is a pure function of its inputs; nothing touches the
//! local store or the view.

pub mod advisor;
pub mod affordability;
pub mod amortization;
pub mod assessment;
pub mod common;

pub use advisor::{
    AdvisorError, AdvisorSelections, AdvisorStep, Lifestyle, PaymentPlans, Predictions, SalaryTier,
    ScoreBand, SmartAdvisor, TimelineStep,
};
pub use affordability::{AffordabilityCalculator, AffordabilityInput, AffordabilityResult, FeeSchedule};
pub use amortization::monthly_payment;
pub use assessment::{AssessmentInput, AssessmentResult, FinancialAssessment, MonthsToGoal};
