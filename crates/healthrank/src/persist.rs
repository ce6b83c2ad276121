//! JSON file helpers shared by catalog and report persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HealthRankError, Result};

/// Write `value` as pretty JSON, creating parent directories and
/// overwriting any existing file.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                HealthRankError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        HealthRankError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        HealthRankError::Persistence(format!("Failed to serialize {}: {}", what, e))
    })?;
    writer.flush().map_err(|e| {
        HealthRankError::Persistence(format!(
            "Failed to write file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read a JSON file; a corrupt file is a persistence error.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        HealthRankError::Persistence(format!(
            "Failed to open file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        HealthRankError::Persistence(format!(
            "Failed to parse {} '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}
