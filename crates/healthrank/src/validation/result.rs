//! Per-check results and the aggregated report.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::persist::{read_json, write_json};

/// Outcome of one quality check.
///
/// `is_valid` tracks `errors.is_empty()`; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: IndexMap<String, Value>,
}

impl ValidationResult {
    /// Create a passing result with no findings.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            metrics: IndexMap::new(),
        }
    }

    /// Record an error; the result becomes invalid.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    /// Record an advisory warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record a metric, replacing any previous value under the same name.
    pub fn set_metric(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.metrics.insert(name.into(), value.into());
    }

    pub fn metric(&self, name: &str) -> Option<&Value> {
        self.metrics.get(name)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of the four quality checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub structure: ValidationResult,
    pub geographic: ValidationResult,
    pub indicators: ValidationResult,
    pub completeness: ValidationResult,
}

/// Flattened per-check entry used for the persisted summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub is_valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Check names paired with their results, in report order.
    pub fn checks(&self) -> [(&'static str, &ValidationResult); 4] {
        [
            ("structure", &self.structure),
            ("geographic", &self.geographic),
            ("indicators", &self.indicators),
            ("completeness", &self.completeness),
        ]
    }

    /// Overall validity: every check passed.
    pub fn is_valid(&self) -> bool {
        self.checks().iter().all(|(_, r)| r.is_valid)
    }

    pub fn error_count(&self) -> usize {
        self.checks().iter().map(|(_, r)| r.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.checks().iter().map(|(_, r)| r.warnings.len()).sum()
    }

    /// Flattened `{check: {is_valid, error_count, warning_count, errors, warnings}}`.
    pub fn summary(&self) -> IndexMap<String, CheckSummary> {
        self.checks()
            .into_iter()
            .map(|(name, r)| {
                (
                    name.to_string(),
                    CheckSummary {
                        is_valid: r.is_valid,
                        error_count: r.errors.len(),
                        warning_count: r.warnings.len(),
                        errors: r.errors.clone(),
                        warnings: r.warnings.clone(),
                    },
                )
            })
            .collect()
    }

    /// Write the flattened summary as pretty JSON.
    pub fn save_summary(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), &self.summary(), "validation summary")
    }

    /// Write the full report, metrics included.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self, "validation report")
    }

    /// Load a full report written by [`ValidationReport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), "validation report")
    }
}
