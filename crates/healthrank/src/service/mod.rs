//! Read-only query service over a loaded dataset and its catalog.
//!
//! A [`DataService`] is built once at startup and never mutated, so it can
//! be shared across request handlers without locking.

mod filter;
mod records;

pub use filter::{DataQuery, MAX_LIMIT};
pub use records::{cell_value, project_row, Record};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::IndicatorCatalog;
use crate::error::QueryError;
use crate::input::columns::{self, BASE_COLUMNS};
use crate::input::{DataTable, LoadedDataset, SourceMetadata};
use crate::validation::ValidationReport;

/// A county row from the geography listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    pub fipscode: String,
    pub county: String,
    pub state: String,
}

/// Indicator metadata exposed to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInfo {
    pub id: String,
    pub description: String,
    pub has_confidence_intervals: bool,
    pub complete: bool,
    /// Column suffixes available for this indicator.
    pub available_columns: Vec<String>,
}

/// Counts reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub counties_loaded: usize,
    pub indicators_available: usize,
}

/// Immutable dataset, catalog and optional validation report.
#[derive(Debug, Clone)]
pub struct DataService {
    table: DataTable,
    catalog: IndicatorCatalog,
    source: Option<SourceMetadata>,
    report: Option<ValidationReport>,
}

impl DataService {
    /// Create a service over a table and its catalog.
    pub fn new(table: DataTable, catalog: IndicatorCatalog) -> Self {
        Self {
            table,
            catalog,
            source: None,
            report: None,
        }
    }

    /// Create a service from a loaded file, keeping its metadata.
    pub fn from_dataset(dataset: LoadedDataset, catalog: IndicatorCatalog) -> Self {
        Self {
            table: dataset.table,
            catalog,
            source: Some(dataset.source),
            report: None,
        }
    }

    /// Attach the validation report computed for this dataset.
    pub fn with_report(mut self, report: ValidationReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn health(&self) -> ServiceHealth {
        ServiceHealth {
            counties_loaded: self.table.row_count(),
            indicators_available: self.catalog.summary.total_indicators,
        }
    }

    /// Distinct state names, sorted.
    pub fn states(&self) -> Vec<String> {
        let Some(idx) = self.table.column_index(columns::STATE) else {
            return Vec::new();
        };
        let states: BTreeSet<&str> = self.table.column_values(idx).flatten().collect();
        states.into_iter().map(str::to_string).collect()
    }

    /// Counties of a state (case-insensitive), sorted by county name.
    pub fn counties_by_state(&self, state: &str) -> Result<Vec<County>, QueryError> {
        let wanted = state.trim().to_lowercase();
        let state_idx = self.table.column_index(columns::STATE);
        let county_idx = self.table.column_index(columns::COUNTY);
        let fips_idx = self.table.column_index(columns::FIPS);

        let text = |row: usize, idx: Option<usize>| -> String {
            idx.and_then(|i| self.table.get(row, i))
                .unwrap_or_default()
                .to_string()
        };

        let mut counties: Vec<County> = match state_idx {
            Some(idx) => (0..self.table.row_count())
                .filter(|&row| {
                    self.table
                        .get(row, idx)
                        .is_some_and(|s| s.to_lowercase() == wanted)
                })
                .map(|row| County {
                    fipscode: text(row, fips_idx),
                    county: text(row, county_idx),
                    state: text(row, state_idx),
                })
                .collect(),
            None => Vec::new(),
        };

        if counties.is_empty() {
            return Err(QueryError::not_found(
                "state",
                format!("State '{}' not found", state),
            ));
        }

        counties.sort_by(|a, b| a.county.cmp(&b.county));
        Ok(counties)
    }

    /// Published indicators with their metadata, sorted by id.
    pub fn indicators(&self) -> Vec<IndicatorInfo> {
        let mut indicators: Vec<IndicatorInfo> = self
            .catalog
            .indicators
            .iter()
            .map(|ind| IndicatorInfo {
                id: ind.id.clone(),
                description: ind.description.clone(),
                has_confidence_intervals: ind.has_confidence_intervals,
                complete: ind.complete,
                available_columns: ind.suffixes(),
            })
            .collect();
        indicators.sort_by(|a, b| a.id.cmp(&b.id));
        indicators
    }

    /// Filtered, projected records.
    pub fn query(&self, query: &DataQuery) -> Result<Vec<Record>, QueryError> {
        let query = query.normalized();
        query.validate()?;

        let columns = self.projection(query.indicator.as_deref())?;
        let rows = self.matching_rows(&query);

        debug!(matched = rows.len(), columns = columns.len(), "data query");

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows
            .into_iter()
            .take(limit)
            .map(|row| project_row(&self.table, row, &columns))
            .collect())
    }

    /// Column indices to return: base + indicator columns, or everything.
    fn projection(&self, indicator: Option<&str>) -> Result<Vec<usize>, QueryError> {
        let Some(id) = indicator else {
            return Ok((0..self.table.column_count()).collect());
        };

        let info = self.catalog.get(id).ok_or_else(|| {
            QueryError::not_found("indicator", format!("Indicator '{}' not found", id))
        })?;

        let mut columns: Vec<usize> = BASE_COLUMNS
            .iter()
            .filter_map(|name| self.table.column_index(name))
            .collect();
        for key in info.columns.values() {
            if let Some(idx) = self.table.column_index(key) {
                if !columns.contains(&idx) {
                    columns.push(idx);
                }
            }
        }
        Ok(columns)
    }

    fn matching_rows(&self, query: &DataQuery) -> Vec<usize> {
        let state = query.state.as_ref().map(|s| s.to_lowercase());
        let state_idx = self.table.column_index(columns::STATE);
        let fips_idx = self.table.column_index(columns::FIPS);
        let year_idx = self.table.column_index(columns::YEAR);

        (0..self.table.row_count())
            .filter(|&row| {
                let state_ok = match &state {
                    Some(wanted) => state_idx
                        .and_then(|i| self.table.get(row, i))
                        .is_some_and(|s| s.to_lowercase() == *wanted),
                    None => true,
                };
                let fips_ok = match &query.fipscode {
                    Some(wanted) => fips_idx
                        .and_then(|i| self.table.get(row, i))
                        .is_some_and(|f| f == wanted),
                    None => true,
                };
                let year_ok = match query.year {
                    Some(wanted) => year_idx
                        .and_then(|i| DataTable::integer(self.table.get(row, i)))
                        .is_some_and(|y| y == wanted),
                    None => true,
                };
                state_ok && fips_ok && year_ok
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IndicatorExtractor;
    use serde_json::json;

    fn service() -> DataService {
        let headers = vec![
            "fipscode",
            "state",
            "county",
            "year",
            "v001_rawvalue",
            "v001_cilow",
            "v001_cihigh",
            "v002_rawvalue",
        ];
        let rows = vec![
            vec!["01003", "Alabama", "Baldwin", "2025", "298.2", "285.4", "311.0", "0.2"],
            vec!["01001", "Alabama", "Autauga", "2025", "350.5", "325.1", "375.8", ""],
            vec!["06037", "California", "Los Angeles", "2025", "289.1", "286.2", "292.0", "0.1"],
            vec!["06037", "California", "Los Angeles", "2024", "280.0", "270.0", "290.0", "0.1"],
        ];
        let table = DataTable::from_text_rows(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        );
        let catalog = IndicatorExtractor::extract(&table.headers, &table.headers);
        DataService::new(table, catalog)
    }

    #[test]
    fn test_states_sorted_distinct() {
        assert_eq!(service().states(), vec!["Alabama", "California"]);
    }

    #[test]
    fn test_counties_by_state_case_insensitive() {
        let counties = service().counties_by_state("alabama").unwrap();
        let names: Vec<&str> = counties.iter().map(|c| c.county.as_str()).collect();
        assert_eq!(names, vec!["Autauga", "Baldwin"]);
        assert_eq!(counties[0].fipscode, "01001");
    }

    #[test]
    fn test_unknown_state_is_not_found() {
        let err = service().counties_by_state("Atlantis").unwrap_err();
        assert!(matches!(err, QueryError::NotFound { resource: "state", .. }));
    }

    #[test]
    fn test_indicators_listing() {
        let indicators = service().indicators();
        assert_eq!(indicators.len(), 2);
        assert_eq!(indicators[0].id, "v001");
        assert!(indicators[0].has_confidence_intervals);
        assert_eq!(indicators[0].available_columns, vec!["rawvalue", "cilow", "cihigh"]);
    }

    #[test]
    fn test_query_requires_filter() {
        let err = service().query(&DataQuery::default()).unwrap_err();
        assert!(matches!(err, QueryError::BadRequest { .. }));
    }

    #[test]
    fn test_query_state_and_year() {
        let query = DataQuery {
            state: Some("CALIFORNIA".to_string()),
            year: Some(2025),
            ..DataQuery::default()
        };
        let records = service().query(&query).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["fipscode"], json!("06037"));
        assert_eq!(records[0].len(), 8);
    }

    #[test]
    fn test_query_indicator_projection() {
        let query = DataQuery {
            indicator: Some("v001".to_string()),
            fipscode: Some("01001".to_string()),
            ..DataQuery::default()
        };
        let records = service().query(&query).unwrap();
        assert_eq!(records.len(), 1);

        let keys: Vec<&str> = records[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["fipscode", "state", "county", "year", "v001_rawvalue", "v001_cilow", "v001_cihigh"]
        );
        assert_eq!(records[0]["v001_rawvalue"], json!(350.5));
        assert_eq!(records[0]["year"], json!(2025));
    }

    #[test]
    fn test_query_missing_cells_are_null() {
        let query = DataQuery {
            indicator: Some("v002".to_string()),
            fipscode: Some("01001".to_string()),
            ..DataQuery::default()
        };
        let records = service().query(&query).unwrap();
        assert_eq!(records[0]["v002_rawvalue"], serde_json::Value::Null);
    }

    #[test]
    fn test_query_unknown_indicator() {
        let query = DataQuery {
            indicator: Some("v999".to_string()),
            ..DataQuery::default()
        };
        let err = service().query(&query).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { resource: "indicator", .. }));
    }

    #[test]
    fn test_query_limit() {
        let query = DataQuery {
            state: Some("alabama".to_string()),
            limit: Some(1),
            ..DataQuery::default()
        };
        assert_eq!(service().query(&query).unwrap().len(), 1);
    }

    #[test]
    fn test_query_no_match_is_empty() {
        let query = DataQuery {
            year: Some(1999),
            ..DataQuery::default()
        };
        assert!(service().query(&query).unwrap().is_empty());
    }

    #[test]
    fn test_health() {
        let health = service().health();
        assert_eq!(health.counties_loaded, 4);
        assert_eq!(health.indicators_available, 2);
    }
}
