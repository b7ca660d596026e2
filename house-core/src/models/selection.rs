use serde::{Deserialize, Serialize};

/// A wizard field the buyer answers by clicking one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    BuyerType,
    Salary,
    Location,
    PropertyType,
    PaymentMethod,
    Lifestyle,
    Priority,
    Timeframe,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::BuyerType,
        Field::Salary,
        Field::Location,
        Field::PropertyType,
        Field::PaymentMethod,
        Field::Lifestyle,
        Field::Priority,
        Field::Timeframe,
    ];

    /// Key used in the persisted selections map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyerType => "buyerType",
            Self::Salary => "salary",
            Self::Location => "location",
            Self::PropertyType => "propertyType",
            Self::PaymentMethod => "paymentMethod",
            Self::Lifestyle => "lifestyle",
            Self::Priority => "priority",
            Self::Timeframe => "timeframe",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// The chips offered for this field as `(value, label)` pairs.
    pub fn options(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::BuyerType => &[
                ("first_time", "First-time buyer"),
                ("upgrader", "Upgrading"),
                ("investor", "Investor"),
            ],
            Self::Salary => &[
                ("150000-300000", "₦150k–₦300k"),
                ("300000-600000", "₦300k–₦600k"),
                ("600000-1200000", "₦600k–₦1.2M"),
                (">1200000", "₦1.2M+"),
            ],
            Self::Location => &[
                ("lekki", "Lekki/Ajah"),
                ("ikeja", "Ikeja"),
                ("yaba", "Yaba"),
                ("other", "Other"),
            ],
            Self::PropertyType => &[
                ("flat", "Flat/Apartment"),
                ("house", "House"),
                ("duplex", "Duplex"),
                ("terrace", "Terrace"),
            ],
            Self::PaymentMethod => &[
                ("cash", "Cash"),
                ("mortgage", "Mortgage"),
                ("installment", "Installment Plan"),
            ],
            Self::Lifestyle => &[
                ("minimal", "Minimal"),
                ("moderate", "Moderate"),
                ("comfort", "Comfort"),
                ("luxury", "Luxury"),
            ],
            Self::Priority => &[
                ("schools", "Near schools"),
                ("transport", "Transport access"),
                ("security", "High security"),
                ("amenities", "Amenities"),
            ],
            Self::Timeframe => &[
                ("0-3m", "0–3 months"),
                ("3-6m", "3–6 months"),
                ("6-12m", "6–12 months"),
                (">12m", "12+ months"),
            ],
        }
    }

    /// Human-readable label for `value`, if it is one of this field's chips.
    pub fn label(
        &self,
        value: &str,
    ) -> Option<&'static str> {
        self.options()
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
    }

    /// Display text for an optional selection: the chip label, else the raw
    /// value, else `-`.
    pub fn pretty(
        &self,
        value: Option<&str>,
    ) -> String {
        match value {
            Some(v) if !v.is_empty() => self.label(v).unwrap_or(v).to_string(),
            _ => "-".to_string(),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_key() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
        assert_eq!(Field::parse("bedrooms"), None);
    }

    #[test]
    fn pretty_uses_label_then_raw_value_then_dash() {
        assert_eq!(Field::Salary.pretty(Some("300000-600000")), "₦300k–₦600k");
        assert_eq!(Field::Location.pretty(Some("abuja")), "abuja");
        assert_eq!(Field::Priority.pretty(None), "-");
        assert_eq!(Field::Priority.pretty(Some("")), "-");
    }

    #[test]
    fn every_field_offers_chips() {
        for field in Field::ALL {
            assert!(!field.options().is_empty(), "{field} has no options");
        }
    }
}
