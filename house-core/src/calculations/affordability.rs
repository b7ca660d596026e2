//! Budget calculator: down payment split, mortgage payment, and the
//! indicative closing fees of a purchase.
//!
//! # Breakdown
//!
//! | Figure        | Formula |
//! |---------------|---------|
//! | Down payment  | price × down% |
//! | Loan amount   | price − down payment |
//! | Legal fees    | 5% of price |
//! | Agent fees    | 3% of price |
//! | Stamp duty    | 1.5% of price |
//! | Registration  | 1% of price |
//! | Survey        | 0.5% of price, clamped to ₦300,000 – ₦1,500,000 |
//! | Upfront total | down payment + all fees |
//! | Total cost    | price + all fees |
//!
//! Inputs are clamped before use: price to `[0, ₦1,000,000,000,000,000]`,
//! rate to `[0, 1000]` percent and tenor to `[1, 50]` years.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use house_core::calculations::{AffordabilityCalculator, AffordabilityInput, FeeSchedule};
//!
//! let input = AffordabilityInput {
//!     price: dec!(50000000),
//!     down_pct: dec!(20),
//!     annual_rate_pct: dec!(0),
//!     tenor_years: 20,
//! };
//!
//! let schedule = FeeSchedule::default();
//! let result = AffordabilityCalculator::new(&schedule).calculate(&input);
//!
//! assert_eq!(result.down_payment, dec!(10000000));
//! assert_eq!(result.loan_amount, dec!(40000000));
//! assert_eq!(result.total_cost, dec!(55550000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::amortization::monthly_payment;
use crate::calculations::common::{clamp, max};

/// Largest price the calculator accepts, in whole naira.
pub const MAX_PRICE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest annual rate the calculator accepts, in percent.
pub const MAX_RATE_PCT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

pub const MAX_TENOR_YEARS: u32 = 50;

/// Fee percentages and survey bounds applied to a purchase price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub legal_rate: Decimal,
    pub agent_rate: Decimal,
    pub stamp_duty_rate: Decimal,
    pub registration_rate: Decimal,
    pub survey_rate: Decimal,
    pub survey_min: Decimal,
    pub survey_max: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            legal_rate: Decimal::new(5, 2),
            agent_rate: Decimal::new(3, 2),
            stamp_duty_rate: Decimal::new(15, 3),
            registration_rate: Decimal::new(1, 2),
            survey_rate: Decimal::new(5, 3),
            survey_min: Decimal::from(300_000),
            survey_max: Decimal::from(1_500_000),
        }
    }
}

/// Raw calculator inputs, as read from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Property price in whole naira.
    pub price: Decimal,

    /// Down payment as a percentage of price.
    pub down_pct: Decimal,

    /// Annual interest rate in percent (e.g. `9` for 9%).
    pub annual_rate_pct: Decimal,

    /// Loan tenor in years.
    pub tenor_years: u32,
}

impl AffordabilityInput {
    /// Clamps every field into its valid range: price in
    /// `[0, MAX_PRICE]`, down% in `[0, 100]`, rate in `[0, MAX_RATE_PCT]`,
    /// tenor in `[1, MAX_TENOR_YEARS]`.
    pub fn sanitized(&self) -> Self {
        Self {
            price: clamp(self.price, Decimal::ZERO, MAX_PRICE),
            down_pct: clamp(self.down_pct, Decimal::ZERO, Decimal::ONE_HUNDRED),
            annual_rate_pct: clamp(self.annual_rate_pct, Decimal::ZERO, MAX_RATE_PCT),
            tenor_years: self.tenor_years.clamp(1, MAX_TENOR_YEARS),
        }
    }
}

/// Closing fees for a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub legal: Decimal,
    pub agent: Decimal,
    pub stamp_duty: Decimal,
    pub survey: Decimal,
    pub registration: Decimal,
}

impl FeeBreakdown {
    pub fn total(&self) -> Decimal {
        self.legal
            .saturating_add(self.agent)
            .saturating_add(self.stamp_duty)
            .saturating_add(self.survey)
            .saturating_add(self.registration)
    }
}

/// Every figure the calculator displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub down_payment: Decimal,
    pub loan_amount: Decimal,
    pub monthly_payment: Decimal,
    pub fees: FeeBreakdown,

    /// Cash needed at signing: down payment plus all fees.
    pub upfront_total: Decimal,

    /// Price plus all fees.
    pub total_cost: Decimal,
}

/// Calculator bound to a fee schedule.
#[derive(Debug, Clone)]
pub struct AffordabilityCalculator<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> AffordabilityCalculator<'a> {
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        Self { schedule }
    }

    /// Computes the full breakdown.
    ///
    /// Out-of-range inputs are clamped first (see
    /// [`AffordabilityInput::sanitized`]), so this never fails.
    pub fn calculate(
        &self,
        input: &AffordabilityInput,
    ) -> AffordabilityResult {
        let input = input.sanitized();

        let fees = self.fees(input.price);
        let down_payment = self.down_payment(input.price, input.down_pct);
        let loan_amount = max(input.price - down_payment, Decimal::ZERO);
        let monthly_payment = monthly_payment(loan_amount, input.annual_rate_pct, input.tenor_years);

        let fee_total = fees.total();

        AffordabilityResult {
            down_payment,
            loan_amount,
            monthly_payment,
            upfront_total: down_payment.saturating_add(fee_total),
            total_cost: input.price.saturating_add(fee_total),
            fees,
        }
    }

    fn down_payment(
        &self,
        price: Decimal,
        down_pct: Decimal,
    ) -> Decimal {
        price * down_pct / Decimal::ONE_HUNDRED
    }

    fn fees(
        &self,
        price: Decimal,
    ) -> FeeBreakdown {
        let s = self.schedule;
        FeeBreakdown {
            legal: price.saturating_mul(s.legal_rate),
            agent: price.saturating_mul(s.agent_rate),
            stamp_duty: price.saturating_mul(s.stamp_duty_rate),
            survey: clamp(price.saturating_mul(s.survey_rate), s.survey_min, s.survey_max),
            registration: price.saturating_mul(s.registration_rate),
        }
    }
}
