//! Store facade - one engine plus the high-level table operations

use rusqlite::Connection;
use serde_json::{Map, Value};
use tracing::{info, trace, warn};

use crate::condition::WhereCondition;
use crate::db::{open_database, Engine, Row};
use crate::error::{Error, Result};
use crate::models::StoreConfig;
use crate::schema::Column;
use crate::statement;

/// Owns one engine for its whole lifetime. Not meant to be shared between
/// threads; callers serialize access themselves.
#[derive(Debug)]
pub struct Store<E = Connection> {
    engine: E,
    config: StoreConfig,
}

impl Store<Connection> {
    /// Open the SQLite file `file` (`.sqlite` is appended unless already
    /// there; `:memory:` stays in memory).
    pub fn open(file: &str, config: StoreConfig) -> Result<Self> {
        let conn = open_database(file)?;
        Ok(Store::new(conn, config))
    }
}

impl<E: Engine> Store<E> {
    pub fn new(engine: E, config: StoreConfig) -> Self {
        Store { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Run a statement that returns no rows.
    ///
    /// With `suppress_errors` an engine failure is logged and the store is
    /// returned as if the statement had succeeded.
    pub fn execute(&self, sql: &str) -> Result<&Self> {
        self.log_statement(sql);
        match self.engine.execute(sql) {
            Ok(()) => Ok(self),
            Err(err) => self.recover(sql, err).map(|()| self),
        }
    }

    /// Run a statement and return its rows.
    ///
    /// With `suppress_errors` an engine failure is logged and yields no rows,
    /// indistinguishable from an empty result.
    pub fn query(&self, sql: &str) -> Result<Vec<Row>> {
        self.log_statement(sql);
        match self.engine.query(sql) {
            Ok(rows) => Ok(rows),
            Err(err) => self.recover(sql, err).map(|()| Vec::new()),
        }
    }

    pub fn create_table(&self, name: &str, columns: &[Column], if_not_exists: bool) -> Result<&Self> {
        let sql = statement::create_table(name, columns, if_not_exists)?;
        self.execute(&sql)
    }

    pub fn insert(&self, table: &str, values: &Map<String, Value>) -> Result<&Self> {
        let sql = statement::insert(table, values)?;
        self.execute(&sql)
    }

    /// Select `columns` from `table`. When a single named column is selected
    /// and `raw` is false every row is unwrapped to that column's value.
    pub fn select<S: AsRef<str>>(
        &self,
        table: &str,
        conditions: &[WhereCondition],
        columns: &[S],
        raw: bool,
    ) -> Result<Vec<Value>> {
        let sql = statement::select(table, conditions, columns)?;
        let rows = self.query(&sql)?;

        let unwrap = !raw && columns.len() == 1 && columns[0].as_ref().trim() != "*";
        Ok(rows
            .into_iter()
            .map(|row| {
                if unwrap {
                    row.into_iter().next().map(|(_, v)| v).unwrap_or(Value::Null)
                } else {
                    Value::Object(row)
                }
            })
            .collect())
    }

    /// Every row of `table`.
    pub fn fetch_all(&self, table: &str) -> Result<Vec<Value>> {
        self.select(table, &[], &["*"], false)
    }

    pub fn update(
        &self,
        table: &str,
        conditions: &[WhereCondition],
        column: &str,
        value: &Value,
    ) -> Result<&Self> {
        let sql = statement::update(table, conditions, column, value)?;
        self.execute(&sql)
    }

    pub fn delete_rows(&self, table: &str, conditions: &[WhereCondition]) -> Result<&Self> {
        let sql = statement::delete(table, conditions)?;
        self.execute(&sql)
    }

    pub fn drop_table(&self, table: &str) -> Result<&Self> {
        let sql = statement::drop_table(table)?;
        self.execute(&sql)
    }

    fn log_statement(&self, sql: &str) {
        if self.config.debug {
            info!(target: "sqlite_easy::sql", sql, "executing statement");
        } else {
            trace!(target: "sqlite_easy::sql", sql, "executing statement");
        }
    }

    fn recover(&self, sql: &str, err: Error) -> Result<()> {
        if self.config.suppress_errors && err.is_engine() {
            warn!(target: "sqlite_easy::sql", sql, error = %err, "statement failed");
            Ok(())
        } else {
            Err(err)
        }
    }
}
