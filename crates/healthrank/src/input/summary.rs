//! Quick data quality snapshot of a loaded table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::columns;
use super::source::DataTable;

/// Headline counts for a dataset, computed without a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Data rows (one per county/year).
    pub total_counties: usize,
    pub states_covered: usize,
    /// `[min, max]` of the integer year values, if any.
    pub year_range: Option<[i64; 2]>,
    pub missing_fips: usize,
    /// Repeats of an already seen FIPS code. Blank cells are counted in
    /// `missing_fips` only, however often they repeat.
    pub duplicate_fips: usize,
}

impl DatasetSummary {
    pub fn of(table: &DataTable) -> Self {
        let (missing_fips, duplicate_fips) = match table.column_index(columns::FIPS) {
            Some(idx) => {
                let mut seen = HashSet::new();
                let mut missing = 0;
                let mut duplicates = 0;
                for value in table.column_values(idx) {
                    match value {
                        None => missing += 1,
                        Some(code) if !seen.insert(code) => duplicates += 1,
                        Some(_) => {}
                    }
                }
                (missing, duplicates)
            }
            None => (0, 0),
        };

        let states_covered = table
            .column_index(columns::STATE)
            .map(|idx| table.column_values(idx).flatten().collect::<HashSet<_>>().len())
            .unwrap_or(0);

        let year_range = table.column_index(columns::YEAR).and_then(|idx| {
            let years: Vec<i64> = table
                .column_values(idx)
                .filter_map(DataTable::integer)
                .collect();
            let min = years.iter().min()?;
            let max = years.iter().max()?;
            Some([*min, *max])
        });

        Self {
            total_counties: table.row_count(),
            states_covered,
            year_range,
            missing_fips,
            duplicate_fips,
        }
    }
}
