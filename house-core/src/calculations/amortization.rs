//! Level monthly payment for a fully amortizing loan.
//!
//! ```text
//! payment = P × r × (1 + r)^n / ((1 + r)^n − 1)
//! ```
//!
//! where `r` is the monthly rate (`annual / 100 / 12`) and `n` the number of
//! monthly periods. The form above is algebraically the same as
//! `P × r / (1 − (1 + r)^−n)` but needs no negative exponent.

use rust_decimal::{Decimal, MathematicalOps};

const MONTHS_PER_YEAR: u32 = 12;

/// Computes the level monthly payment for `principal` at `annual_rate_pct`
/// percent per year over `years` years.
///
/// * A non-positive principal yields zero.
/// * A zero (or negative) rate yields `principal / months`.
/// * `years` below one is treated as one year.
/// * A payment too large to represent saturates at [`Decimal::MAX`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::round_whole;
/// use house_core::calculations::monthly_payment;
///
/// let payment = monthly_payment(dec!(40000000), dec!(9), 30);
/// assert_eq!(round_whole(payment), dec!(321849));
///
/// assert_eq!(monthly_payment(dec!(1200000), dec!(0), 10), dec!(10000));
/// ```
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
) -> Decimal {
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let months = Decimal::from(years.max(1)) * Decimal::from(MONTHS_PER_YEAR);
    let even_share = principal / months;
    if annual_rate_pct <= Decimal::ZERO {
        return even_share;
    }

    let rate = annual_rate_pct / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR);
    let interest_only = principal.saturating_mul(rate);
    let growth = Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powu(u64::from(years.max(1)) * u64::from(MONTHS_PER_YEAR)));

    match growth {
        // The rate is below the representable precision.
        Some(growth) if growth <= Decimal::ONE => even_share,
        Some(growth) => match growth.checked_div(growth - Decimal::ONE) {
            Some(factor) => interest_only.saturating_mul(factor),
            None => even_share,
        },
        // Growth beyond the representable range: the payment converges on
        // the interest-only amount.
        None => interest_only,
    }
}

/// Total of all scheduled payments over the life of the loan.
pub fn total_repayment(
    principal: Decimal,
    annual_rate_pct: Decimal,
    years: u32,
) -> Decimal {
    monthly_payment(principal, annual_rate_pct, years)
        .saturating_mul(Decimal::from(years.max(1)) * Decimal::from(MONTHS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_whole;

    #[test]
    fn nine_percent_thirty_years_matches_reference_value() {
        let payment = monthly_payment(dec!(40000000), dec!(9), 30);

        assert_eq!(round_whole(payment), dec!(321849));
    }

    #[test]
    fn wizard_default_budget_payment() {
        // 35,000,000 with 20% down leaves 28,000,000 financed.
        let payment = monthly_payment(dec!(28000000), dec!(9), 30);

        assert_eq!(round_whole(payment), dec!(225294));
    }

    #[test]
    fn zero_principal_pays_nothing() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(9), 30), Decimal::ZERO);
    }

    #[test]
    fn zero_rate_divides_evenly() {
        assert_eq!(monthly_payment(dec!(40000000), Decimal::ZERO, 20), dec!(40000000) / dec!(240));
    }

    #[test]
    fn tenor_below_one_year_is_one_year() {
        assert_eq!(
            monthly_payment(dec!(1200), Decimal::ZERO, 0),
            monthly_payment(dec!(1200), Decimal::ZERO, 1)
        );
    }

    #[test]
    fn extreme_rate_falls_back_to_interest_only() {
        let payment = monthly_payment(dec!(1000000), dec!(1200), 40);

        assert_eq!(payment, dec!(1000000));
    }

    #[test]
    fn two_hundred_percent_rate_does_not_overflow() {
        let payment = monthly_payment(dec!(40000000), dec!(200), 30);

        // (1 + r)^n is huge, so the payment sits just above interest only.
        assert!(payment > dec!(6666666));
        assert!(payment < dec!(6666667));
    }

    #[test]
    fn huge_principal_saturates_instead_of_panicking() {
        assert_eq!(monthly_payment(Decimal::MAX, dec!(1200), 1), Decimal::MAX);
        assert_eq!(total_repayment(Decimal::MAX, dec!(9), 30), Decimal::MAX);
    }

    #[test]
    fn total_repayment_exceeds_principal_with_interest() {
        let total = total_repayment(dec!(40000000), dec!(9), 30);

        assert!(total > dec!(115000000));
        assert!(total < dec!(116000000));
    }

    proptest! {
        #[test]
        fn zero_rate_payment_is_exact_share(loan in 0u64..1_000_000_000, years in 1u32..=40) {
            let loan = Decimal::from(loan);
            prop_assert_eq!(
                monthly_payment(loan, Decimal::ZERO, years),
                loan / Decimal::from(years * 12)
            );
        }

        #[test]
        fn payments_cover_principal(
            loan in 1u64..1_000_000_000,
            rate_bp in 1u32..5_000,
            years in 1u32..=40,
        ) {
            let loan = Decimal::from(loan);
            let rate = Decimal::from(rate_bp) / dec!(100);
            let payment = monthly_payment(loan, rate, years);
            prop_assert!(payment * Decimal::from(years * 12) >= loan);
        }

        #[test]
        fn any_rate_and_price_gives_a_payment(
            mantissa in 0u64..1_000_000_000_000_000_000,
            exponent in 0u32..=9,
            rate_bp in 0u32..=100_000,
            years in 0u32..=100,
        ) {
            // Up to 1e27.
            let loan = Decimal::from(mantissa) * Decimal::from(10u64.pow(exponent));
            let rate = Decimal::from(rate_bp) / dec!(100);
            let payment = monthly_payment(loan, rate, years);
            prop_assert!(payment >= Decimal::ZERO);
            if loan > Decimal::ZERO && rate > Decimal::ZERO {
                let interest_only = loan.saturating_mul(rate / dec!(100) / dec!(12));
                prop_assert!(payment >= interest_only);
            }
        }
    }
}
