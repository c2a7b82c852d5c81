//! Row module - utilities for converting SQLite rows to JSON values

use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde_json::{Number, Value};

/// Convert SQLite row to JSON value with proper type handling
///
/// # Arguments
/// * `row` - Reference to the SQLite row
/// * `i` - Column index
///
/// # Returns
/// JSON value representing the SQLite column value. Blobs come back as
/// base64 text.
pub fn sqlite_to_json(row: &Row, i: usize) -> rusqlite::Result<Value> {
    let value = match row.get_ref(i)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Value::Number(Number::from_f64(f).unwrap_or(Number::from(0))),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
    };
    Ok(value)
}
