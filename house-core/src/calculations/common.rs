//! Common utility functions for money calculations.
//!
//! This module provides shared rounding and clamping helpers used across the
//! calculator, the assessment scorer, and the wizard.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to whole currency units, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(321849.0467)), dec!(321849));
/// assert_eq!(round_whole(dec!(0.5)), dec!(1));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to the nearest multiple of `unit`.
///
/// A zero or negative `unit` leaves the value unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::round_to_nearest;
///
/// assert_eq!(round_to_nearest(dec!(44550000), dec!(100000)), dec!(44600000));
/// assert_eq!(round_to_nearest(dec!(44549999), dec!(100000)), dec!(44500000));
/// ```
pub fn round_to_nearest(
    value: Decimal,
    unit: Decimal,
) -> Decimal {
    if unit <= Decimal::ZERO {
        return value;
    }
    round_whole(value / unit) * unit
}

/// Clamps `value` into the inclusive range `[low, high]`.
///
/// When the bounds are inverted the lower bound wins.
pub fn clamp(
    value: Decimal,
    low: Decimal,
    high: Decimal,
) -> Decimal {
    max(low, value.min(high))
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// `part / whole × 100`, saturating at [`Decimal::MAX`] or [`Decimal::MIN`]
/// when the quotient is not representable. Zero `whole` yields zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use house_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(5), dec!(20)), dec!(25));
/// assert_eq!(percent_of(dec!(1000000), Decimal::new(1, 22)), Decimal::MAX);
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(148500.005)), dec!(148500.01));
    }

    #[test]
    fn round_half_up_preserves_already_rounded_values() {
        assert_eq!(round_half_up(dec!(148500.00)), dec!(148500.00));
    }

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        assert_eq!(round_whole(dec!(225294.33)), dec!(225294));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        assert_eq!(round_whole(dec!(445.5)), dec!(446));
    }

    #[test]
    fn round_whole_handles_zero() {
        assert_eq!(round_whole(Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // round_to_nearest tests
    // =========================================================================

    #[test]
    fn round_to_nearest_hundred_thousand() {
        assert_eq!(
            round_to_nearest(dec!(89100000), dec!(100000)),
            dec!(89100000)
        );
        assert_eq!(
            round_to_nearest(dec!(22275000), dec!(100000)),
            dec!(22300000)
        );
    }

    #[test]
    fn round_to_nearest_ignores_non_positive_unit() {
        assert_eq!(round_to_nearest(dec!(123.4), Decimal::ZERO), dec!(123.4));
        assert_eq!(round_to_nearest(dec!(123.4), dec!(-10)), dec!(123.4));
    }

    // =========================================================================
    // clamp tests
    // =========================================================================

    #[test]
    fn clamp_raises_values_below_range() {
        assert_eq!(clamp(dec!(250000), dec!(300000), dec!(1500000)), dec!(300000));
    }

    #[test]
    fn clamp_lowers_values_above_range() {
        assert_eq!(clamp(dec!(2000000), dec!(300000), dec!(1500000)), dec!(1500000));
    }

    #[test]
    fn clamp_keeps_values_inside_range() {
        assert_eq!(clamp(dec!(500000), dec!(300000), dec!(1500000)), dec!(500000));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(150.00), dec!(150.00)), dec!(150.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        assert_eq!(max(dec!(-50.00), dec!(50.00)), dec!(50.00));
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_handles_fractions() {
        assert_eq!(percent_of(dec!(1), dec!(8)), dec!(12.5));
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percent_of_saturates_on_tiny_whole() {
        let tiny = Decimal::new(1, 28);

        assert_eq!(percent_of(dec!(-100000000), tiny), Decimal::MIN);
        assert_eq!(percent_of(dec!(100000000), tiny), Decimal::MAX);
    }
}
