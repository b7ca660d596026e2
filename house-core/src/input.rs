use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a form value cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}'")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops thousands separators and a leading naira sign.
fn normalize_amount_input(s: &str) -> String {
    s.trim().trim_start_matches('₦').replace(',', "")
}

/// Parses a form value into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an optional
/// `₦` prefix. Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseAmountError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a form value, substituting zero when it is not a number.
///
/// The substitution is logged as a warning so a bad field is visible in the
/// logs without interrupting the calculation.
pub fn parse_amount_or_zero(s: &str) -> Decimal {
    parse_amount(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, error = %e.source, "substituting zero for invalid amount");
        Decimal::ZERO
    })
}

/// Parses an optional form value. Returns `None` for empty input or when
/// parsing fails (logs a warning on parse failure).
pub fn parse_optional_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().map_or_else(
            |e| {
                tracing::warn!(input = %s, "invalid optional amount: {}", e);
                None
            },
            Some,
        )
    }
}
