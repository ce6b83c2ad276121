//! Indicator catalog types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column suffixes that carry meaning for classification.
pub mod suffix {
    pub const RAW_VALUE: &str = "rawvalue";
    pub const NUMERATOR: &str = "numerator";
    pub const DENOMINATOR: &str = "denominator";
    pub const CI_LOW: &str = "cilow";
    pub const CI_HIGH: &str = "cihigh";
}

/// A health metric assembled from the columns sharing a `v###` prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Indicator id, e.g. `v001`.
    pub id: String,
    /// Suffix → column key (`rawvalue` → `v001_rawvalue`).
    pub columns: IndexMap<String, String>,
    /// Description taken from the `rawvalue` column header.
    pub description: String,
    /// True iff a `rawvalue` column exists.
    pub complete: bool,
    /// True iff both `cilow` and `cihigh` columns exist.
    pub has_confidence_intervals: bool,
}

impl Indicator {
    /// Create an empty, incomplete indicator.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            columns: IndexMap::new(),
            description: String::new(),
            complete: false,
            has_confidence_intervals: false,
        }
    }

    /// Column key for a suffix, if present.
    pub fn column(&self, suffix: &str) -> Option<&str> {
        self.columns.get(suffix).map(|s| s.as_str())
    }

    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.columns.contains_key(suffix)
    }

    /// Observed suffixes in first-seen order.
    pub fn suffixes(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }
}

/// Why an indicator was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MalformedIssue {
    /// No `rawvalue` column; the indicator is not published.
    #[serde(rename = "Missing rawvalue column - incomplete indicator")]
    MissingRawValue,
    /// Exactly one of `numerator`/`denominator`; the indicator stays published.
    #[serde(rename = "Mismatched numerator/denominator pair")]
    MismatchedNumeratorDenominator,
}

impl MalformedIssue {
    /// The persisted issue text.
    pub fn label(&self) -> &'static str {
        match self {
            MalformedIssue::MissingRawValue => "Missing rawvalue column - incomplete indicator",
            MalformedIssue::MismatchedNumeratorDenominator => {
                "Mismatched numerator/denominator pair"
            }
        }
    }
}

impl std::fmt::Display for MalformedIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An indicator flagged during extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalformedRecord {
    pub id: String,
    pub issue: MalformedIssue,
    /// Suffixes observed for the indicator.
    pub columns: Vec<String>,
}

/// Catalog-level counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_indicators: usize,
    /// Always equal to `total_indicators`; only complete indicators are published.
    pub complete_indicators: usize,
    pub indicators_with_ci: usize,
    pub malformed_count: usize,
    pub total_columns_processed: usize,
}

/// Published indicators, flagged anomalies and summary counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    pub indicators: Vec<Indicator>,
    pub malformed: Vec<MalformedRecord>,
    pub summary: CatalogSummary,
}

impl IndicatorCatalog {
    /// Find a published indicator by id.
    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id == id)
    }

    /// Whether an indicator id is published.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Malformed records for an indicator id.
    pub fn malformed_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MalformedRecord> {
        self.malformed.iter().filter(move |m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_serializes_to_text() {
        let json = serde_json::to_string(&MalformedIssue::MissingRawValue).unwrap();
        assert_eq!(json, "\"Missing rawvalue column - incomplete indicator\"");

        let parsed: MalformedIssue =
            serde_json::from_str("\"Mismatched numerator/denominator pair\"").unwrap();
        assert_eq!(parsed, MalformedIssue::MismatchedNumeratorDenominator);
    }

    #[test]
    fn test_indicator_shape() {
        let mut ind = Indicator::new("v001");
        ind.columns
            .insert("rawvalue".to_string(), "v001_rawvalue".to_string());
        let value = serde_json::to_value(&ind).unwrap();

        assert_eq!(value["id"], "v001");
        assert_eq!(value["columns"]["rawvalue"], "v001_rawvalue");
        assert_eq!(value["description"], "");
        assert_eq!(value["complete"], false);
        assert_eq!(value["has_confidence_intervals"], false);
    }
}
