//! Persistence for indicator catalogs - save/load JSON files.

use std::path::Path;

use tracing::info;

use super::indicator::IndicatorCatalog;
use crate::error::Result;
use crate::persist::{read_json, write_json};

impl IndicatorCatalog {
    /// Save the catalog to a JSON file, replacing any previous version.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use healthrank::IndicatorCatalog;
    /// # fn example(catalog: &IndicatorCatalog) -> healthrank::Result<()> {
    /// catalog.save("config/indicator_catalog.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json(path, self, "indicator catalog")?;
        info!(path = %path.display(), indicators = self.summary.total_indicators, "saved indicator catalog");
        Ok(())
    }

    /// Load a catalog previously written by [`IndicatorCatalog::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref(), "indicator catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IndicatorExtractor;
    use crate::error::HealthRankError;
    use tempfile::TempDir;

    fn sample_catalog() -> IndicatorCatalog {
        let keys = [
            "fipscode",
            "v001_rawvalue",
            "v001_cilow",
            "v001_cihigh",
            "v002_rawvalue",
            "v002_numerator",
            "v003_flag",
        ];
        let descriptions = ["FIPS", "Premature death", "", "", "Poor health", "", ""];
        IndicatorExtractor::extract(&keys, &descriptions)
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("catalog.json");
        let catalog = sample_catalog();

        catalog.save(&path).unwrap();
        let loaded = IndicatorCatalog::load(&path).unwrap();

        assert_eq!(loaded, catalog);
        assert_eq!(loaded.indicators[0].id, "v001");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");

        sample_catalog().save(&path).unwrap();
        IndicatorCatalog::default().save(&path).unwrap();

        let loaded = IndicatorCatalog::load(&path).unwrap();
        assert!(loaded.indicators.is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = IndicatorCatalog::load(&path).unwrap_err();
        assert!(matches!(err, HealthRankError::Persistence(_)));
    }

    #[test]
    fn test_persisted_shape() {
        let value = serde_json::to_value(sample_catalog()).unwrap();
        assert!(value["indicators"].is_array());
        assert_eq!(value["malformed"][0]["issue"], "Mismatched numerator/denominator pair");
        assert_eq!(value["summary"]["total_columns_processed"], 7);
        assert_eq!(value["summary"]["malformed_count"], 2);
    }
}
