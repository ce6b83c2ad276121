//! Main HealthRank struct and public API.

use std::path::Path;

use tracing::info;

use crate::catalog::{IndicatorCatalog, IndicatorExtractor};
use crate::error::Result;
use crate::input::{DualHeaderParser, LoadedDataset, ParserConfig};
use crate::service::DataService;
use crate::validation::{QualityValidator, ValidationReport, ValidationSchema};

/// Configuration for loading and validation.
#[derive(Debug, Clone, Default)]
pub struct HealthRankConfig {
    /// Loader configuration.
    pub parser: ParserConfig,
    /// Validation thresholds.
    pub schema: ValidationSchema,
}

/// Result of processing one dual-header file.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub dataset: LoadedDataset,
    pub catalog: IndicatorCatalog,
    pub report: ValidationReport,
}

impl AnalysisResult {
    /// Hand the dataset, catalog and report to a query service.
    pub fn into_service(self) -> DataService {
        DataService::from_dataset(self.dataset, self.catalog).with_report(self.report)
    }
}

/// Load → extract → validate pipeline.
pub struct HealthRank {
    parser: DualHeaderParser,
    validator: QualityValidator,
}

impl HealthRank {
    /// Create an instance with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(HealthRankConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: HealthRankConfig) -> Result<Self> {
        Ok(Self {
            parser: DualHeaderParser::with_config(config.parser),
            validator: QualityValidator::new(config.schema)?,
        })
    }

    /// Load a dual-header file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedDataset> {
        self.parser.parse_file(path)
    }

    /// Build the catalog for a loaded dataset.
    pub fn extract(&self, dataset: &LoadedDataset) -> IndicatorCatalog {
        IndicatorExtractor::extract(&dataset.column_keys, &dataset.descriptions)
    }

    /// Reuse a persisted catalog when one exists, otherwise extract and persist it.
    pub fn catalog_for(
        &self,
        dataset: &LoadedDataset,
        catalog_path: impl AsRef<Path>,
    ) -> Result<IndicatorCatalog> {
        let catalog_path = catalog_path.as_ref();
        if catalog_path.exists() {
            info!(path = %catalog_path.display(), "reusing persisted indicator catalog");
            return IndicatorCatalog::load(catalog_path);
        }

        let catalog = self.extract(dataset);
        catalog.save(catalog_path)?;
        Ok(catalog)
    }

    /// Run every quality check.
    pub fn validate(&self, dataset: &LoadedDataset, catalog: &IndicatorCatalog) -> ValidationReport {
        let report = self
            .validator
            .run_all(&dataset.table, &dataset.column_keys, catalog);
        info!(
            valid = report.is_valid(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation finished"
        );
        report
    }

    /// Load, extract and validate a file in one step.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let dataset = self.load(path)?;
        let catalog = self.extract(&dataset);
        let report = self.validate(&dataset, &catalog);

        Ok(AnalysisResult {
            dataset,
            catalog,
            report,
        })
    }
}
