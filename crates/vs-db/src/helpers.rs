//! Row-to-snapshot conversion helpers.

use vs_core::CellValue;

/// Convert a libSQL value into a driver-independent cell.
#[must_use]
pub fn to_cell(value: libsql::Value) -> CellValue {
    match value {
        libsql::Value::Null => CellValue::Null,
        libsql::Value::Integer(v) => CellValue::Integer(v),
        libsql::Value::Real(v) => CellValue::Real(v),
        libsql::Value::Text(v) => CellValue::Text(v),
        libsql::Value::Blob(v) => CellValue::Blob(v),
    }
}

/// Read every column of a row.
///
/// A column that cannot be read becomes `Null`; row existence is what gets
/// counted, so one unreadable cell must not drop the row.
#[must_use]
pub fn row_cells(row: &libsql::Row, width: i32) -> Vec<CellValue> {
    (0..width)
        .map(|idx| {
            row.get_value(idx).map_or_else(
                |error| {
                    tracing::debug!(idx, %error, "unreadable cell");
                    CellValue::Null
                },
                to_cell,
            )
        })
        .collect()
}
