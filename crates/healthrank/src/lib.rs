//! HealthRank: indicator catalogs and data quality checks for County Health
//! Rankings style datasets.
//!
//! Input files carry two header rows: human-readable descriptions, then
//! machine column keys. Indicator columns follow the `v###_suffix`
//! convention (`v001_rawvalue`, `v001_cilow`, ...).
//!
//! # Pipeline
//!
//! - **Load**: read the dual-header file into a [`DataTable`]
//! - **Extract**: group indicator columns into an [`IndicatorCatalog`]
//! - **Validate**: run the structure, geographic, indicator and completeness
//!   checks into a [`ValidationReport`]
//! - **Serve**: answer read-only queries through a [`DataService`]
//!
//! # Example
//!
//! ```no_run
//! use healthrank::HealthRank;
//!
//! let healthrank = HealthRank::new().unwrap();
//! let result = healthrank.analyze("analytic_data2025.csv").unwrap();
//!
//! println!("Indicators: {}", result.catalog.summary.total_indicators);
//! println!("Valid: {}", result.report.is_valid());
//! ```

pub mod catalog;
pub mod error;
pub mod input;
pub mod report;
pub mod service;
pub mod validation;

mod healthrank;
mod persist;

pub use crate::healthrank::{AnalysisResult, HealthRank, HealthRankConfig};
pub use catalog::{Indicator, IndicatorCatalog, IndicatorExtractor, MalformedIssue, MalformedRecord};
pub use error::{HealthRankError, QueryError, Result};
pub use input::{
    DataTable, DatasetSummary, DualHeaderParser, LoadedDataset, ParserConfig, SourceMetadata,
};
pub use service::{DataQuery, DataService, Record};
pub use validation::{QualityValidator, ValidationReport, ValidationResult, ValidationSchema};
