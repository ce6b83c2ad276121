//! Plain-text rendering of a validation report.

use std::fmt;

use crate::validation::ValidationReport;

/// Metrics too large to print inline.
const DETAILED_METRICS: &[&str] = &["indicator_validation", "column_completeness"];

/// Render the report as human-readable text.
pub fn render(report: &ValidationReport) -> String {
    ReportText(report).to_string()
}

struct ReportText<'a>(&'a ValidationReport);

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(50);

        writeln!(f, "Data Validation Report")?;
        writeln!(f, "{}", rule)?;

        for (name, result) in report.checks() {
            let status = if result.is_valid { "PASS" } else { "FAIL" };
            writeln!(f)?;
            writeln!(f, "{} VALIDATION: {}", name.to_uppercase(), status)?;

            if !result.errors.is_empty() {
                writeln!(f, "  Errors:")?;
                for error in &result.errors {
                    writeln!(f, "    - {}", error)?;
                }
            }

            if !result.warnings.is_empty() {
                writeln!(f, "  Warnings:")?;
                for warning in &result.warnings {
                    writeln!(f, "    - {}", warning)?;
                }
            }

            let mut key_metrics = result
                .metrics
                .iter()
                .filter(|(k, _)| !DETAILED_METRICS.contains(&k.as_str()))
                .peekable();
            if key_metrics.peek().is_some() {
                writeln!(f, "  Key Metrics:")?;
                for (metric, value) in key_metrics {
                    writeln!(f, "    - {}: {}", metric, value)?;
                }
            }
        }

        let overall = if report.is_valid() { "VALID" } else { "INVALID" };
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "OVERALL VALIDATION: {}", overall)?;
        writeln!(f, "Total Errors: {}", report.error_count())?;
        write!(f, "Total Warnings: {}", report.warning_count())
    }
}
