//! Dual-header CSV loader.
//!
//! County Health Rankings exports carry two header rows: the first holds
//! human-readable descriptions, the second the machine column keys
//! (`fipscode`, `v001_rawvalue`, ...). Data rows follow.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{DataTable, SourceMetadata};
use crate::error::{HealthRankError, Result};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            max_rows: None,
        }
    }
}

/// Everything read from a dual-header file.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Row 1: human-readable descriptions, aligned with `column_keys`.
    pub descriptions: Vec<String>,
    /// Row 2: machine column keys.
    pub column_keys: Vec<String>,
    /// Data rows keyed by `column_keys`.
    pub table: DataTable,
    /// File metadata.
    pub source: SourceMetadata,
}

/// Parses dual-header tabular files.
pub struct DualHeaderParser {
    config: ParserConfig,
}

impl DualHeaderParser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file into headers, table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<LoadedDataset> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| HealthRankError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| HealthRankError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (descriptions, column_keys, table) = self.parse_bytes(&contents)?;

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded dual-header dataset"
        );

        Ok(LoadedDataset {
            descriptions,
            column_keys,
            table,
            source,
        })
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(Vec<String>, Vec<String>, DataTable)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let descriptions: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(|s| s.to_string()).collect(),
            None => return Err(HealthRankError::EmptyData("No description row found".to_string())),
        };
        let column_keys: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(|s| s.trim().to_string()).collect(),
            None => return Err(HealthRankError::EmptyData("No column key row found".to_string())),
        };

        if descriptions.len() != column_keys.len() {
            return Err(HealthRankError::HeaderMismatch {
                descriptions: descriptions.len(),
                keys: column_keys.len(),
            });
        }

        let expected_cols = column_keys.len();
        let mut rows = Vec::new();

        for (row_idx, result) in records.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    debug!(max, "row limit reached");
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|s| DataTable::classify_cell(s.to_string()))
                .collect();

            // Short rows are padded with missing cells, long rows cut
            row.resize(expected_cols, None);
            rows.push(row);
        }

        Ok((descriptions, column_keys.clone(), DataTable::new(column_keys, rows)))
    }
}

impl Default for DualHeaderParser {
    fn default() -> Self {
        Self::new()
    }
}
