//! Data quality validation: structural, geographic, indicator and completeness checks.

mod result;
mod schema;
mod validators;

pub use result::{CheckSummary, ValidationReport, ValidationResult};
pub use schema::ValidationSchema;
pub use validators::{
    Check, CheckInput, CompletenessCheck, GeographicCheck, IndicatorCheck, QualityValidator,
    StructureCheck,
};
