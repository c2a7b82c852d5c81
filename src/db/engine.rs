//! Engine seam - anything that runs SQL text

use rusqlite::Connection;
use serde_json::{Map, Value};

use super::sqlite_to_json;
use crate::error::Result;

/// One result row, column name to value, in column order
pub type Row = Map<String, Value>;

/// Runs SQL text handed over by the [`Store`](crate::Store).
pub trait Engine {
    /// Run one or more statements that return no rows.
    fn execute(&self, sql: &str) -> Result<()>;

    /// Run a statement and collect every row it returns.
    fn query(&self, sql: &str) -> Result<Vec<Row>>;
}

impl Engine for Connection {
    fn execute(&self, sql: &str) -> Result<()> {
        self.execute_batch(sql)?;
        Ok(())
    }

    fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let mut stmt = self.prepare(sql)?;
        let column_names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt.query([])?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = Map::new();
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), sqlite_to_json(row, i)?);
            }
            results.push(map);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_decodes_storage_classes() {
        let conn = Connection::open_in_memory().unwrap();
        let rows = Engine::query(
            &conn,
            "SELECT NULL AS n, 7 AS i, 1.5 AS r, 'txt' AS t, X'0102' AS b",
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["n"], Value::Null);
        assert_eq!(row["i"], serde_json::json!(7));
        assert_eq!(row["r"], serde_json::json!(1.5));
        assert_eq!(row["t"], serde_json::json!("txt"));
        assert_eq!(row["b"], serde_json::json!("AQI="));
        let names: Vec<&String> = row.keys().collect();
        assert_eq!(names, ["n", "i", "r", "t", "b"]);
    }

    #[test]
    fn test_execute_reports_engine_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err = Engine::execute(&conn, "CREATE TABLE").unwrap_err();
        assert!(err.is_engine());
    }
}
