//! Loaded dataset representation and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding both header rows).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// In-memory table keyed by machine column keys.
///
/// Cells are `None` when missing. A present cell is never empty: the
/// NA tokens recognized by [`DataTable::is_null_value`] are mapped to
/// `None` on construction.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    /// Column keys, in file order.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Create a new data table from already-classified cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Create a table from raw text cells, treating NA tokens as missing.
    pub fn from_text_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Self::classify_cell).collect())
            .collect();
        Self { headers, rows }
    }

    /// Convert a raw text cell into a present or missing cell.
    pub fn classify_cell(raw: String) -> Option<String> {
        if Self::is_null_value(&raw) {
            None
        } else {
            Some(raw)
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells (rows × columns).
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Position of a column by key.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|c| c.as_deref()))
    }

    /// Get a column by key.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value; `None` when missing or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Number of missing cells in a column.
    pub fn missing_in_column(&self, index: usize) -> usize {
        self.column_values(index).filter(|v| v.is_none()).count()
    }

    /// Number of missing cells in the whole table.
    pub fn missing_count(&self) -> usize {
        (0..self.column_count())
            .map(|i| self.missing_in_column(i))
            .sum()
    }

    /// Parse a present cell as a number.
    pub fn numeric(value: Option<&str>) -> Option<f64> {
        value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|n| !n.is_nan())
    }

    /// Parse a present cell as a whole number (accepts `2025` and `2025.0`).
    pub fn integer(value: Option<&str>) -> Option<i64> {
        let trimmed = value?.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(n);
        }
        let f = trimmed.parse::<f64>().ok()?;
        (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
    }

    /// Check if a raw value represents a missing/null value. Matching is
    /// exact (case-sensitive) against pandas' default NA strings.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
    }
}

/// Cells read as missing, mirroring `pandas.read_csv` defaults.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
