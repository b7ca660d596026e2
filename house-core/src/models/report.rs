use serde::{Deserialize, Serialize};

/// A titled card of free-text lines in the wizard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub lines: Vec<String>,
}

impl SummaryCard {
    pub fn new<I, S>(
        title: &str,
        lines: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.to_string(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// A headed list of `label: value` rows in a printable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: String,
    pub rows: Vec<(String, String)>,
}

impl ReportSection {
    pub fn new<I, L, V>(
        heading: &str,
        rows: I,
    ) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<String>,
    {
        Self {
            heading: heading.to_string(),
            rows: rows
                .into_iter()
                .map(|(label, value)| (label.into(), value.into()))
                .collect(),
        }
    }

    pub fn value(
        &self,
        label: &str,
    ) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}
