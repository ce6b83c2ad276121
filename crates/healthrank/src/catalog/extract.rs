//! Indicator extraction from `v###_suffix` column keys.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::indicator::{
    suffix, CatalogSummary, Indicator, IndicatorCatalog, MalformedIssue, MalformedRecord,
};

/// `v` + three digits + `_` + suffix.
static INDICATOR_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^v(\d{3})_(.+)$").expect("indicator key pattern is valid"));

/// Split an indicator column key into `(indicator_id, suffix)`.
///
/// Returns `None` for geographic and metadata columns.
pub fn parse_indicator_key(key: &str) -> Option<(String, &str)> {
    let caps = INDICATOR_KEY.captures(key)?;
    let digits = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    Some((format!("v{}", digits), rest))
}

/// Builds an [`IndicatorCatalog`] from a dual-header pair.
pub struct IndicatorExtractor;

impl IndicatorExtractor {
    /// Group indicator columns, classify them and flag anomalies.
    ///
    /// `descriptions` is aligned with `column_keys` by position; a missing
    /// position reads as an empty description.
    pub fn extract<S: AsRef<str>, D: AsRef<str>>(
        column_keys: &[S],
        descriptions: &[D],
    ) -> IndicatorCatalog {
        let mut grouped: IndexMap<String, Indicator> = IndexMap::new();

        for (i, key) in column_keys.iter().enumerate() {
            let key = key.as_ref();
            let Some((id, col_suffix)) = parse_indicator_key(key) else {
                continue;
            };

            let indicator = grouped
                .entry(id.clone())
                .or_insert_with(|| Indicator::new(id));
            indicator
                .columns
                .insert(col_suffix.to_string(), key.to_string());

            if col_suffix == suffix::RAW_VALUE && indicator.description.is_empty() {
                let description = descriptions.get(i).map(|d| d.as_ref()).unwrap_or("");
                indicator.description = description.trim_matches('"').to_string();
            }
        }

        let mut indicators = Vec::new();
        let mut malformed = Vec::new();

        for (_, mut indicator) in grouped {
            if !indicator.has_suffix(suffix::RAW_VALUE) {
                warn!(id = %indicator.id, "indicator has no rawvalue column");
                malformed.push(MalformedRecord {
                    id: indicator.id.clone(),
                    issue: MalformedIssue::MissingRawValue,
                    columns: indicator.suffixes(),
                });
                continue;
            }

            indicator.complete = true;
            indicator.has_confidence_intervals =
                indicator.has_suffix(suffix::CI_LOW) && indicator.has_suffix(suffix::CI_HIGH);

            let has_num = indicator.has_suffix(suffix::NUMERATOR);
            let has_denom = indicator.has_suffix(suffix::DENOMINATOR);
            if has_num != has_denom {
                debug!(id = %indicator.id, "numerator/denominator pair is incomplete");
                malformed.push(MalformedRecord {
                    id: indicator.id.clone(),
                    issue: MalformedIssue::MismatchedNumeratorDenominator,
                    columns: indicator.suffixes(),
                });
            }

            indicators.push(indicator);
        }

        let summary = CatalogSummary {
            total_indicators: indicators.len(),
            complete_indicators: indicators.len(),
            indicators_with_ci: indicators
                .iter()
                .filter(|i| i.has_confidence_intervals)
                .count(),
            malformed_count: malformed.len(),
            total_columns_processed: column_keys.len(),
        };

        debug!(
            published = summary.total_indicators,
            malformed = summary.malformed_count,
            "indicator extraction finished"
        );

        IndicatorCatalog {
            indicators,
            malformed,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indicator_key() {
        assert_eq!(
            parse_indicator_key("v001_rawvalue"),
            Some(("v001".to_string(), "rawvalue"))
        );
        assert_eq!(
            parse_indicator_key("v123_race_white"),
            Some(("v123".to_string(), "race_white"))
        );
        assert_eq!(parse_indicator_key("fipscode"), None);
        assert_eq!(parse_indicator_key("v01_rawvalue"), None);
        assert_eq!(parse_indicator_key("v0001_rawvalue"), None);
        assert_eq!(parse_indicator_key("V001_rawvalue"), None);
        assert_eq!(parse_indicator_key("v001_"), None);
    }

    #[test]
    fn test_complete_indicator_with_ci() {
        let keys = [
            "state",
            "county",
            "fipscode",
            "v001_rawvalue",
            "v001_cilow",
            "v001_cihigh",
        ];
        let descriptions = [
            "State",
            "County",
            "FIPS",
            "\"Premature Death raw value\"",
            "Premature Death CI low",
            "Premature Death CI high",
        ];
        let catalog = IndicatorExtractor::extract(&keys, &descriptions);

        assert_eq!(catalog.indicators.len(), 1);
        let v001 = &catalog.indicators[0];
        assert_eq!(v001.id, "v001");
        assert!(v001.complete);
        assert!(v001.has_confidence_intervals);
        assert_eq!(v001.description, "Premature Death raw value");
        assert!(catalog.malformed.is_empty());
        assert_eq!(catalog.summary.total_columns_processed, 6);
    }

    #[test]
    fn test_missing_rawvalue_is_not_published() {
        let catalog = IndicatorExtractor::extract(&["v999_other"], &["Other"]);

        assert!(catalog.indicators.is_empty());
        assert_eq!(catalog.malformed.len(), 1);
        assert_eq!(catalog.malformed[0].issue, MalformedIssue::MissingRawValue);
        assert_eq!(catalog.malformed[0].columns, vec!["other"]);
        assert_eq!(catalog.summary.malformed_count, 1);
    }

    #[test]
    fn test_mismatched_pair_stays_published() {
        let keys = ["v002_rawvalue", "v002_numerator"];
        let catalog = IndicatorExtractor::extract(&keys, &["Poor health", "Num"]);

        assert_eq!(catalog.indicators.len(), 1);
        assert_eq!(catalog.malformed.len(), 1);
        assert_eq!(
            catalog.malformed[0].issue,
            MalformedIssue::MismatchedNumeratorDenominator
        );
        assert_eq!(catalog.malformed[0].columns, vec!["rawvalue", "numerator"]);
    }

    #[test]
    fn test_full_pair_is_not_flagged() {
        let keys = ["v003_numerator", "v003_denominator", "v003_rawvalue"];
        let catalog = IndicatorExtractor::extract(&keys, &["", "", "Rate"]);
        assert!(catalog.malformed.is_empty());
    }

    #[test]
    fn test_order_follows_first_appearance() {
        let keys = [
            "v010_cilow",
            "v002_rawvalue",
            "v010_rawvalue",
            "v001_rawvalue",
            "v002_cilow",
        ];
        let descriptions = ["a", "b", "c", "d", "e"];
        let catalog = IndicatorExtractor::extract(&keys, &descriptions);

        let ids: Vec<&str> = catalog.indicators.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["v010", "v002", "v001"]);
    }

    #[test]
    fn test_first_rawvalue_description_wins() {
        let keys = ["v005_rawvalue", "v005_rawvalue"];
        let catalog = IndicatorExtractor::extract(&keys, &["First", "Second"]);
        assert_eq!(catalog.indicators[0].description, "First");
    }

    #[test]
    fn test_empty_description_is_replaced_later() {
        let keys = ["v005_rawvalue", "v005_rawvalue"];
        let catalog = IndicatorExtractor::extract(&keys, &["", "Second"]);
        assert_eq!(catalog.indicators[0].description, "Second");
    }

    #[test]
    fn test_ci_flag_requires_both_bounds() {
        let keys = ["v004_rawvalue", "v004_cilow"];
        let catalog = IndicatorExtractor::extract(&keys, &["x", "y"]);
        assert!(!catalog.indicators[0].has_confidence_intervals);
        assert_eq!(catalog.summary.indicators_with_ci, 0);
    }

    #[test]
    fn test_short_descriptions_read_as_empty() {
        let keys = ["state", "v001_rawvalue"];
        let descriptions: [&str; 1] = ["State"];
        let catalog = IndicatorExtractor::extract(&keys, &descriptions);
        assert_eq!(catalog.indicators[0].description, "");
    }

    #[test]
    fn test_no_indicators() {
        let catalog = IndicatorExtractor::extract(&["state", "county"], &["State", "County"]);
        assert!(catalog.indicators.is_empty());
        assert!(catalog.malformed.is_empty());
        assert_eq!(catalog.summary.total_columns_processed, 2);
    }
}
