//! Server configuration loaded from `healthrank.toml`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use healthrank::{HealthRankConfig, HealthRankError, ParserConfig, ValidationSchema};
use serde::{Deserialize, Serialize};

/// Settings for the `serve` command. Every field has a default, so an
/// empty or absent file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_file_path")]
    pub data_file_path: PathBuf,
    #[serde(default = "default_indicator_catalog_path")]
    pub indicator_catalog_path: PathBuf,
    #[serde(default = "default_validation_report_path")]
    pub validation_report_path: PathBuf,
    /// JSON file with validation schema overrides.
    #[serde(default)]
    pub validation_schema_path: Option<PathBuf>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub max_rows: Option<usize>,
}

fn default_data_file_path() -> PathBuf {
    PathBuf::from("data/analytic_data2025.csv")
}

fn default_indicator_catalog_path() -> PathBuf {
    PathBuf::from("config/indicator_catalog.json")
}

fn default_validation_report_path() -> PathBuf {
    PathBuf::from("config/validation_report.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file_path: default_data_file_path(),
            indicator_catalog_path: default_indicator_catalog_path(),
            validation_report_path: default_validation_report_path(),
            validation_schema_path: None,
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            log_level: default_log_level(),
            max_rows: None,
        }
    }
}

impl Settings {
    /// Read settings from a TOML file. `None` when the file does not exist,
    /// so the caller can fall back to the defaults once logging is up.
    pub fn read(path: impl AsRef<Path>) -> Result<Option<Self>, HealthRankError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|e| HealthRankError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw).map(Some)
    }

    /// Parse settings from TOML text.
    pub fn parse(raw: &str) -> Result<Self, HealthRankError> {
        toml::from_str(raw).map_err(|e| HealthRankError::Config(e.to_string()))
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, HealthRankError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| HealthRankError::Config(format!("invalid listen address: {}", e)))
    }

    /// Validation schema with overrides from `validation_schema_path`, if set.
    pub fn schema(&self) -> Result<ValidationSchema, HealthRankError> {
        match &self.validation_schema_path {
            Some(path) => ValidationSchema::from_file(path),
            None => Ok(ValidationSchema::default()),
        }
    }

    /// Pipeline configuration derived from these settings.
    pub fn pipeline_config(&self) -> Result<HealthRankConfig, HealthRankError> {
        Ok(HealthRankConfig {
            parser: ParserConfig {
                max_rows: self.max_rows,
                ..ParserConfig::default()
            },
            schema: self.schema()?,
        })
    }
}
