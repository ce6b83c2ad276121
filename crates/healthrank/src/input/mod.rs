//! Input parsing and data source handling.

pub mod columns;
mod parser;
mod source;
mod summary;

pub use parser::{DualHeaderParser, LoadedDataset, ParserConfig};
pub use source::{DataTable, SourceMetadata};
pub use summary::DatasetSummary;
