//! Validation schema: thresholds and required columns.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HealthRankError, Result};
use crate::input::columns;

/// Options for the quality checks.
///
/// Deserializing a partial document fills the missing options with
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSchema {
    /// Geographic column keys that must be present.
    pub required_columns: Vec<String>,
    /// Minimum number of distinct indicator ids.
    pub minimum_indicators: usize,
    /// Missing rate above which an indicator draws a warning (0..1).
    pub maximum_missing_rate: f64,
    /// Inclusive `[min, max]` range of expected years.
    pub year_range: [i64; 2],
    /// Pattern a FIPS code must match.
    pub fips_pattern: String,
    /// Distinct states below which coverage is reported as low.
    pub minimum_states: usize,
    /// Overall completeness below which a warning is raised (0..1).
    pub minimum_overall_completeness: f64,
    /// Columns with completeness below this are counted as sparse (0..1).
    pub sparse_column_threshold: f64,
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self {
            required_columns: columns::BASE_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            minimum_indicators: 10,
            maximum_missing_rate: 0.8,
            year_range: [2020, 2030],
            fips_pattern: r"^\d{5}$".to_string(),
            minimum_states: 40,
            minimum_overall_completeness: 0.5,
            sparse_column_threshold: 0.1,
        }
    }
}

impl ValidationSchema {
    /// Merge an override object into the defaults.
    ///
    /// Keys present in `overrides` replace the default value; all other
    /// options keep their defaults. Unknown keys are ignored.
    pub fn with_overrides(overrides: &Value) -> Result<Self> {
        let Value::Object(patch) = overrides else {
            return Err(HealthRankError::Config(
                "validation schema override must be a JSON object".to_string(),
            ));
        };

        let mut merged = serde_json::to_value(Self::default())?;
        if let Value::Object(base) = &mut merged {
            for (key, value) in patch {
                if base.contains_key(key) {
                    base.insert(key.clone(), value.clone());
                }
            }
        }

        let schema: Self = serde_json::from_value(merged)
            .map_err(|e| HealthRankError::Config(format!("invalid validation schema: {}", e)))?;
        schema.check()?;
        Ok(schema)
    }

    /// Load overrides from a JSON file and merge them into the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| HealthRankError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let overrides: Value = serde_json::from_str(&text)?;
        Self::with_overrides(&overrides)
    }

    /// Reject option values no check can work with.
    pub fn check(&self) -> Result<()> {
        for (name, rate) in [
            ("maximum_missing_rate", self.maximum_missing_rate),
            ("minimum_overall_completeness", self.minimum_overall_completeness),
            ("sparse_column_threshold", self.sparse_column_threshold),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(HealthRankError::Config(format!(
                    "{} must be within 0..1, got {}",
                    name, rate
                )));
            }
        }
        if self.year_range[0] > self.year_range[1] {
            return Err(HealthRankError::Config(format!(
                "year_range minimum {} exceeds maximum {}",
                self.year_range[0], self.year_range[1]
            )));
        }
        Ok(())
    }
}
