//! Indicator catalog: extraction from column keys and persistence.

mod extract;
mod indicator;
mod persistence;

pub use extract::{parse_indicator_key, IndicatorExtractor};
pub use indicator::{
    suffix, CatalogSummary, Indicator, IndicatorCatalog, MalformedIssue, MalformedRecord,
};
