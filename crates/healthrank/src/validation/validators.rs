//! Quality checks run against a loaded table and its indicator catalog.

use std::collections::{BTreeSet, HashSet};

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{json, Value};
use tracing::debug;

use super::result::{ValidationReport, ValidationResult};
use super::schema::ValidationSchema;
use crate::catalog::{parse_indicator_key, suffix, Indicator, IndicatorCatalog};
use crate::error::Result;
use crate::input::columns;
use crate::input::DataTable;

/// Everything a check may read. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub table: &'a DataTable,
    pub column_keys: &'a [String],
    pub catalog: &'a IndicatorCatalog,
}

/// A single quality check.
pub trait Check {
    /// Key of this check in the report.
    fn name(&self) -> &'static str;

    /// Run the check and return its result.
    fn run(&self, input: &CheckInput<'_>) -> ValidationResult;
}

/// Required columns, indicator count and non-empty data.
pub struct StructureCheck {
    required_columns: Vec<String>,
    minimum_indicators: usize,
}

impl StructureCheck {
    pub fn validate(&self, table: &DataTable, column_keys: &[String]) -> ValidationResult {
        let mut result = ValidationResult::new();

        let missing_required: Vec<&str> = self
            .required_columns
            .iter()
            .filter(|col| !column_keys.contains(col))
            .map(|col| col.as_str())
            .collect();
        if !missing_required.is_empty() {
            result.add_error(format!("Missing required columns: {:?}", missing_required));
        }

        let unique_indicators: HashSet<String> = column_keys
            .iter()
            .filter_map(|key| parse_indicator_key(key).map(|(id, _)| id))
            .collect();
        result.set_metric("indicator_count", unique_indicators.len());
        if unique_indicators.len() < self.minimum_indicators {
            result.add_error(format!(
                "Insufficient indicators: {} < {}",
                unique_indicators.len(),
                self.minimum_indicators
            ));
        }

        result.set_metric("row_count", table.row_count());
        result.set_metric("column_count", column_keys.len());
        if table.row_count() == 0 {
            result.add_error("Dataset is empty");
        }

        result
    }
}

impl Check for StructureCheck {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn run(&self, input: &CheckInput<'_>) -> ValidationResult {
        self.validate(input.table, input.column_keys)
    }
}

/// FIPS format and uniqueness, state coverage and year range.
pub struct GeographicCheck {
    fips_pattern: Regex,
    minimum_states: usize,
    year_range: [i64; 2],
}

impl GeographicCheck {
    pub fn validate(&self, table: &DataTable) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(idx) = table.column_index(columns::FIPS) {
            // Missing codes cannot match the pattern and count as invalid
            let invalid = table
                .column_values(idx)
                .filter(|v| !v.is_some_and(|code| self.fips_pattern.is_match(code)))
                .count();
            result.set_metric("invalid_fips_count", invalid);
            if invalid > 0 {
                result.add_warning(format!("Found {} invalid FIPS codes", invalid));
            }

            // Only present codes are compared; repeated blank cells are
            // reported through `invalid_fips_count`, not as duplicates.
            let mut seen = HashSet::new();
            let duplicates = table
                .column_values(idx)
                .flatten()
                .filter(|code| !seen.insert(*code))
                .count();
            result.set_metric("duplicate_fips_count", duplicates);
            if duplicates > 0 {
                result.add_error(format!("Found {} duplicate FIPS codes", duplicates));
            }
        }

        if let Some(idx) = table.column_index(columns::STATE) {
            let states: HashSet<&str> = table.column_values(idx).flatten().collect();
            result.set_metric("states_covered", states.len());
            if states.len() < self.minimum_states {
                result.add_warning(format!("Low state coverage: only {} states", states.len()));
            }
        }

        if let Some(idx) = table.column_index(columns::YEAR) {
            let mut years = BTreeSet::new();
            let mut unrecognized: Vec<&str> = Vec::new();
            for value in table.column_values(idx).flatten() {
                match DataTable::integer(Some(value)) {
                    Some(year) => {
                        years.insert(year);
                    }
                    None if !unrecognized.contains(&value) => unrecognized.push(value),
                    None => {}
                }
            }

            let [min_year, max_year] = self.year_range;
            let outside: Vec<i64> = years
                .iter()
                .copied()
                .filter(|y| *y < min_year || *y > max_year)
                .collect();
            result.set_metric("years_present", years.into_iter().collect::<Vec<_>>());
            if !outside.is_empty() {
                result.add_warning(format!("Years outside expected range: {:?}", outside));
            }
            if !unrecognized.is_empty() {
                result.add_warning(format!("Unrecognized year values: {:?}", unrecognized));
            }
        }

        result
    }
}

impl Check for GeographicCheck {
    fn name(&self) -> &'static str {
        "geographic"
    }

    fn run(&self, input: &CheckInput<'_>) -> ValidationResult {
        self.validate(input.table)
    }
}

/// Missing rates and confidence interval consistency per indicator.
pub struct IndicatorCheck {
    maximum_missing_rate: f64,
}

impl IndicatorCheck {
    pub fn validate(&self, table: &DataTable, catalog: &IndicatorCatalog) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut indicator_metrics: IndexMap<String, Value> = IndexMap::new();

        for indicator in &catalog.indicators {
            let Some(raw_idx) = indicator
                .column(suffix::RAW_VALUE)
                .and_then(|col| table.column_index(col))
            else {
                continue;
            };

            let total = table.row_count();
            let non_null = table.column_values(raw_idx).filter(|v| v.is_some()).count();
            let missing_rate = if total == 0 {
                0.0
            } else {
                1.0 - non_null as f64 / total as f64
            };

            let value_range = numeric_range(table, raw_idx)
                .map(|(min, max)| json!([min, max]))
                .unwrap_or_else(|| json!([null, null]));

            indicator_metrics.insert(
                indicator.id.clone(),
                json!({
                    "total_values": total,
                    "non_null_values": non_null,
                    "missing_rate": missing_rate,
                    "value_range": value_range,
                }),
            );

            if missing_rate > self.maximum_missing_rate {
                result.add_warning(format!(
                    "{}: High missing rate {:.2}%",
                    indicator.id,
                    missing_rate * 100.0
                ));
            }

            if let Some((invalid, outside)) = self.check_intervals(table, indicator, raw_idx) {
                if invalid > 0 {
                    result.add_error(format!(
                        "{}: {} invalid confidence intervals (low > high)",
                        indicator.id, invalid
                    ));
                }
                if outside > 0 {
                    result.add_warning(format!(
                        "{}: {} values outside confidence intervals",
                        indicator.id, outside
                    ));
                }
            }
        }

        result.set_metric("indicator_validation", json!(indicator_metrics));
        result
    }

    /// Count `(cilow > cihigh, rawvalue outside [cilow, cihigh])` over rows
    /// where all three values are numeric. `None` when either bound column
    /// is absent from the table.
    fn check_intervals(
        &self,
        table: &DataTable,
        indicator: &Indicator,
        raw_idx: usize,
    ) -> Option<(usize, usize)> {
        let low_idx = table.column_index(indicator.column(suffix::CI_LOW)?)?;
        let high_idx = table.column_index(indicator.column(suffix::CI_HIGH)?)?;

        let mut invalid = 0;
        let mut outside = 0;
        for row in 0..table.row_count() {
            let (Some(raw), Some(low), Some(high)) = (
                DataTable::numeric(table.get(row, raw_idx)),
                DataTable::numeric(table.get(row, low_idx)),
                DataTable::numeric(table.get(row, high_idx)),
            ) else {
                continue;
            };

            if low > high {
                invalid += 1;
            }
            if raw < low || raw > high {
                outside += 1;
            }
        }

        Some((invalid, outside))
    }
}

impl Check for IndicatorCheck {
    fn name(&self) -> &'static str {
        "indicators"
    }

    fn run(&self, input: &CheckInput<'_>) -> ValidationResult {
        self.validate(input.table, input.catalog)
    }
}

/// Overall and per-column completeness.
pub struct CompletenessCheck {
    minimum_overall: f64,
    sparse_threshold: f64,
}

impl CompletenessCheck {
    pub fn validate(&self, table: &DataTable) -> ValidationResult {
        let mut result = ValidationResult::new();

        let total_cells = table.cell_count();
        let null_cells = table.missing_count();
        let completeness_rate = if total_cells == 0 {
            1.0
        } else {
            1.0 - null_cells as f64 / total_cells as f64
        };

        result.set_metric("completeness_rate", completeness_rate);
        result.set_metric("total_cells", total_cells);
        result.set_metric("null_cells", null_cells);

        if completeness_rate < self.minimum_overall {
            result.add_warning(format!(
                "Low overall completeness: {:.2}%",
                completeness_rate * 100.0
            ));
        }

        let rows = table.row_count();
        let column_completeness: IndexMap<String, f64> = table
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let rate = if rows == 0 {
                    1.0
                } else {
                    1.0 - table.missing_in_column(idx) as f64 / rows as f64
                };
                (name.clone(), rate)
            })
            .collect();

        let severely_missing = column_completeness
            .values()
            .filter(|rate| **rate < self.sparse_threshold)
            .count();
        result.set_metric("column_completeness", json!(column_completeness));

        if severely_missing > 0 {
            result.add_warning(format!(
                "Columns with <{}% completeness: {} columns",
                format_percent(self.sparse_threshold),
                severely_missing
            ));
        }

        result
    }
}

impl Check for CompletenessCheck {
    fn name(&self) -> &'static str {
        "completeness"
    }

    fn run(&self, input: &CheckInput<'_>) -> ValidationResult {
        self.validate(input.table)
    }
}

/// Runs the four quality checks configured from one [`ValidationSchema`].
pub struct QualityValidator {
    structure: StructureCheck,
    geographic: GeographicCheck,
    indicators: IndicatorCheck,
    completeness: CompletenessCheck,
}

impl QualityValidator {
    /// Build a validator; fails on an invalid FIPS pattern or out-of-range option.
    pub fn new(schema: ValidationSchema) -> Result<Self> {
        schema.check()?;
        let fips_pattern = Regex::new(&schema.fips_pattern)?;

        Ok(Self {
            structure: StructureCheck {
                required_columns: schema.required_columns.clone(),
                minimum_indicators: schema.minimum_indicators,
            },
            geographic: GeographicCheck {
                fips_pattern,
                minimum_states: schema.minimum_states,
                year_range: schema.year_range,
            },
            indicators: IndicatorCheck {
                maximum_missing_rate: schema.maximum_missing_rate,
            },
            completeness: CompletenessCheck {
                minimum_overall: schema.minimum_overall_completeness,
                sparse_threshold: schema.sparse_column_threshold,
            },
        })
    }

    pub fn validate_structure(&self, table: &DataTable, column_keys: &[String]) -> ValidationResult {
        self.structure.validate(table, column_keys)
    }

    pub fn validate_geographic(&self, table: &DataTable) -> ValidationResult {
        self.geographic.validate(table)
    }

    pub fn validate_indicators(
        &self,
        table: &DataTable,
        catalog: &IndicatorCatalog,
    ) -> ValidationResult {
        self.indicators.validate(table, catalog)
    }

    pub fn validate_completeness(&self, table: &DataTable) -> ValidationResult {
        self.completeness.validate(table)
    }

    /// Run every check. The checks are independent of each other.
    pub fn run_all(
        &self,
        table: &DataTable,
        column_keys: &[String],
        catalog: &IndicatorCatalog,
    ) -> ValidationReport {
        let input = CheckInput {
            table,
            column_keys,
            catalog,
        };

        ValidationReport {
            structure: run_check(&self.structure, &input),
            geographic: run_check(&self.geographic, &input),
            indicators: run_check(&self.indicators, &input),
            completeness: run_check(&self.completeness, &input),
        }
    }
}

fn run_check(check: &dyn Check, input: &CheckInput<'_>) -> ValidationResult {
    let result = check.run(input);
    debug!(
        check = check.name(),
        valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "check finished"
    );
    result
}

/// Min and max over the numeric cells of a column.
fn numeric_range(table: &DataTable, idx: usize) -> Option<(f64, f64)> {
    table
        .column_values(idx)
        .filter_map(|v| DataTable::numeric(v))
        .fold(None, |acc, n| match acc {
            None => Some((n, n)),
            Some((min, max)) => Some((min.min(n), max.max(n))),
        })
}

/// `0.1` → `10`, `0.125` → `12.5`.
fn format_percent(fraction: f64) -> String {
    let text = format!("{:.1}", fraction * 100.0);
    text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
}
