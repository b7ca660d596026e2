//! Naira display formatting.
//!
//! Output follows the `en-NG` currency style: a `₦` prefix, comma thousands
//! separators, and a leading minus sign for negative amounts.

use rust_decimal::Decimal;

use crate::calculations::assessment::MonthsToGoal;
use crate::calculations::common::{round_half_up, round_whole};

const NAIRA: char = '₦';

/// Formats `amount` in whole naira, e.g. `₦50,000,000`.
pub fn format_naira(amount: Decimal) -> String {
    format_with_places(round_whole(amount), 0)
}

/// Formats `amount` with kobo, e.g. `₦148,500.00`.
pub fn format_naira_kobo(amount: Decimal) -> String {
    format_with_places(round_half_up(amount), 2)
}

/// Formats a naira range separated by an en dash.
pub fn format_naira_range(
    low: Decimal,
    high: Decimal,
) -> String {
    format!("{} – {}", format_naira(low), format_naira(high))
}

fn format_with_places(
    rounded: Decimal,
    places: u32,
) -> String {
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let magnitude = rounded.abs();

    let whole = magnitude.trunc();
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push(NAIRA);
    out.push_str(&group_thousands(&whole.normalize().to_string()));

    if places > 0 {
        let mut fraction = (magnitude - whole).round_dp(places);
        fraction.rescale(places);
        let digits = fraction.to_string();
        // "0.50" -> ".50"
        out.push_str(digits.trim_start_matches('0'));
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Human-readable time to reach the down-payment goal.
pub fn format_time_to_goal(months: MonthsToGoal) -> String {
    let months = match months {
        MonthsToGoal::Unreachable => return "Increase savings to calculate timeline".to_string(),
        MonthsToGoal::Months(0) => return "Down payment goal achieved!".to_string(),
        MonthsToGoal::Months(m) => m,
    };

    let years = months / 12;
    let rest = months % 12;
    let plural = |n: u64| if n > 1 { "s" } else { "" };

    if years == 0 {
        format!("{rest} month{}", plural(rest))
    } else {
        format!("{years} year{} {rest} month{}", plural(years), plural(rest))
    }
}
