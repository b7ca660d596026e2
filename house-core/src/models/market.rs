//! Indicative market data per location and property type.

use rust_decimal::Decimal;

use crate::format::format_naira_range;

/// Price band and investment figures for one property type in one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketEntry {
    pub property_type: &'static str,
    pub min_price: i64,
    pub max_price: i64,
    /// Expected annual capital growth, percent.
    pub growth_pct: u32,
    /// Expected gross rental yield, percent.
    pub rental_yield_pct: u32,
}

const fn entry(
    property_type: &'static str,
    min_price: i64,
    max_price: i64,
    growth_pct: u32,
    rental_yield_pct: u32,
) -> MarketEntry {
    MarketEntry {
        property_type,
        min_price,
        max_price,
        growth_pct,
        rental_yield_pct,
    }
}

const LEKKI: &[MarketEntry] = &[
    entry("flat", 25_000_000, 45_000_000, 15, 8),
    entry("house", 45_000_000, 120_000_000, 18, 7),
    entry("duplex", 65_000_000, 150_000_000, 20, 6),
    entry("terrace", 55_000_000, 100_000_000, 16, 7),
];

const IKEJA: &[MarketEntry] = &[
    entry("flat", 20_000_000, 35_000_000, 12, 9),
    entry("house", 35_000_000, 80_000_000, 14, 8),
    entry("duplex", 45_000_000, 100_000_000, 15, 7),
    entry("terrace", 40_000_000, 75_000_000, 13, 8),
];

const YABA: &[MarketEntry] = &[
    entry("flat", 18_000_000, 30_000_000, 14, 10),
    entry("house", 30_000_000, 70_000_000, 16, 9),
    entry("duplex", 40_000_000, 90_000_000, 17, 8),
    entry("terrace", 35_000_000, 65_000_000, 15, 9),
];

/// All property types with market data in `location`.
pub fn market_for(location: &str) -> Option<&'static [MarketEntry]> {
    match location {
        "lekki" => Some(LEKKI),
        "ikeja" => Some(IKEJA),
        "yaba" => Some(YABA),
        _ => None,
    }
}

/// Market data for one property type in one location.
pub fn price_band(
    location: &str,
    property_type: &str,
) -> Option<&'static MarketEntry> {
    market_for(location)?
        .iter()
        .find(|e| e.property_type == property_type)
}

/// Neighbourhoods worth viewing around `location`.
pub fn suggested_areas(location: &str) -> Option<&'static [&'static str]> {
    match location {
        "lekki" => Some(&["Chevron", "Ikate", "Agungi"]),
        "ikeja" => Some(&["GRA", "Maryland", "Oregun"]),
        "yaba" => Some(&["Abule-Oja", "Alagomeji", "Sabo"]),
        _ => None,
    }
}

/// Formatted market range for a location and type.
///
/// Without market data the range is ±20% around `fallback_budget`.
pub fn price_range_text(
    location: Option<&str>,
    property_type: Option<&str>,
    fallback_budget: Decimal,
) -> String {
    let band = location
        .zip(property_type)
        .and_then(|(loc, ty)| price_band(loc, ty));

    match band {
        Some(b) => format_naira_range(Decimal::from(b.min_price), Decimal::from(b.max_price)),
        None => format_naira_range(
            fallback_budget * Decimal::new(8, 1),
            fallback_budget * Decimal::new(12, 1),
        ),
    }
}
