//! Column keys of the geographic identifier columns.

pub const STATE_CODE: &str = "statecode";
pub const COUNTY_CODE: &str = "countycode";
pub const FIPS: &str = "fipscode";
pub const STATE: &str = "state";
pub const COUNTY: &str = "county";
pub const YEAR: &str = "year";

/// Every geographic identifier column, in export order.
pub const GEOGRAPHIC_COLUMNS: &[&str] = &[STATE_CODE, COUNTY_CODE, FIPS, STATE, COUNTY, YEAR];

/// Identifier columns returned alongside an indicator's own columns.
pub const BASE_COLUMNS: &[&str] = &[FIPS, STATE, COUNTY, YEAR];

/// Whether `key` names a geographic identifier column.
pub fn is_geographic(key: &str) -> bool {
    GEOGRAPHIC_COLUMNS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_geographic() {
        assert!(is_geographic("fipscode"));
        assert!(is_geographic("countycode"));
        assert!(!is_geographic("v001_rawvalue"));
        assert!(!is_geographic("FIPSCODE"));
    }

    #[test]
    fn test_base_columns_are_geographic() {
        assert!(BASE_COLUMNS.iter().all(|c| is_geographic(c)));
    }
}
