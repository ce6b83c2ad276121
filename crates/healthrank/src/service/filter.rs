//! Query parameters for data lookups.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::QueryError;

/// Largest page a single query may return.
pub const MAX_LIMIT: usize = 10_000;

/// Filters accepted by [`super::DataService::query`].
///
/// At least one of `state`, `fipscode`, `indicator` or `year` must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuery {
    /// State name, matched case-insensitively.
    pub state: Option<String>,
    /// Five-digit FIPS code, matched exactly.
    pub fipscode: Option<String>,
    /// Indicator id such as `v001`; projects the result to its columns.
    pub indicator: Option<String>,
    pub year: Option<i64>,
    /// Maximum number of records (1..=10000).
    pub limit: Option<usize>,
}

impl DataQuery {
    /// Trim text filters and drop empty ones.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            state: clean(&self.state),
            fipscode: clean(&self.fipscode),
            indicator: clean(&self.indicator),
            year: self.year,
            limit: self.limit,
        }
    }

    /// Whether any row filter is present.
    pub fn has_filter(&self) -> bool {
        self.state.is_some() || self.fipscode.is_some() || self.indicator.is_some() || self.year.is_some()
    }

    /// Reject unusable parameter combinations.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !self.has_filter() {
            return Err(QueryError::bad_request(
                "At least one filter parameter is required (state, fipscode, indicator, or year)",
                json!({ "available_filters": ["state", "fipscode", "indicator", "year"] }),
            ));
        }

        if let Some(fips) = &self.fipscode {
            if !is_fips_code(fips) {
                return Err(QueryError::bad_request(
                    "FIPS code must be exactly 5 digits",
                    json!({ "provided_fipscode": fips, "expected_format": "12345" }),
                ));
            }
        }

        if let Some(indicator) = &self.indicator {
            if !is_indicator_id(indicator) {
                return Err(QueryError::bad_request(
                    "Indicator must look like 'v001'",
                    json!({ "provided_indicator": indicator, "expected_format": "v###" }),
                ));
            }
        }

        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(QueryError::bad_request(
                    format!("limit must be between 1 and {}", MAX_LIMIT),
                    json!({ "provided_limit": limit }),
                ));
            }
        }

        Ok(())
    }
}

fn is_fips_code(value: &str) -> bool {
    value.len() == 5 && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_indicator_id(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 4 && bytes[0] == b'v' && bytes[1..].iter().all(|b| b.is_ascii_digit())
}
