//! Conversion of table rows into JSON records.

use indexmap::IndexMap;
use serde_json::Value;

use crate::input::columns;
use crate::input::DataTable;

/// One projected row: column key → value, in projection order.
pub type Record = IndexMap<String, Value>;

/// JSON value for a cell of `column`.
///
/// Missing cells become `null`; `year` is an integer; identifier columns
/// stay strings; everything else is a number when it parses as one.
pub fn cell_value(column: &str, cell: Option<&str>) -> Value {
    let Some(text) = cell else {
        return Value::Null;
    };

    if columns::is_geographic(column) && column != columns::YEAR {
        return Value::String(text.to_string());
    }

    if column == columns::YEAR {
        if let Some(year) = DataTable::integer(Some(text)) {
            return Value::from(year);
        }
    } else if let Ok(n) = text.trim().parse::<i64>() {
        return Value::from(n);
    } else if let Some(n) = DataTable::numeric(Some(text)).filter(|n| n.is_finite()) {
        return Value::from(n);
    }

    Value::String(text.to_string())
}

/// Build a record for `row` over the given column indices.
pub fn project_row(table: &DataTable, row: usize, columns: &[usize]) -> Record {
    columns
        .iter()
        .map(|&idx| {
            let name = &table.headers[idx];
            (name.clone(), cell_value(name, table.get(row, idx)))
        })
        .collect()
}
