//! Error types for the healthrank library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading, extraction and validation.
#[derive(Debug, Error)]
pub enum HealthRankError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Description row and column key row have different lengths.
    #[error("Header mismatch: {descriptions} descriptions vs {keys} keys")]
    HeaderMismatch { descriptions: usize, keys: usize },

    /// Empty file or missing header rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Catalog or report could not be written or read back.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for healthrank operations.
pub type Result<T> = std::result::Result<T, HealthRankError>;

/// Query-time conditions the serving layer turns into transport responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// A named resource (state, indicator) does not exist.
    #[error("{message}")]
    NotFound {
        resource: &'static str,
        message: String,
    },

    /// The request parameters are unusable.
    #[error("{message}")]
    BadRequest {
        message: String,
        details: serde_json::Value,
    },
}

impl QueryError {
    pub fn not_found(resource: &'static str, message: impl Into<String>) -> Self {
        QueryError::NotFound {
            resource,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, details: serde_json::Value) -> Self {
        QueryError::BadRequest {
            message: message.into(),
            details,
        }
    }
}
