//! Node binding - exposes [`Store`] to JavaScript as `EasyDatabase`
//!
//! Columns and conditions cross the boundary as plain objects shaped like
//! [`ColumnSpec`](crate::schema::ColumnSpec) and
//! [`ConditionSpec`](crate::condition::ConditionSpec).

use napi_derive::napi;
use serde_json::Value;

use crate::condition::WhereCondition;
use crate::error::{to_napi_error, Error};
use crate::models::StoreConfig;
use crate::schema::Column;
use crate::store::Store;

#[napi]
pub fn get_sqlite_version() -> String {
    rusqlite::version().to_string()
}

#[napi]
pub struct EasyDatabase {
    store: Store,
}

fn conditions(records: Option<Vec<Value>>) -> crate::Result<Vec<WhereCondition>> {
    records
        .unwrap_or_default()
        .into_iter()
        .map(WhereCondition::from_record)
        .collect()
}

#[napi]
impl EasyDatabase {
    /// Open `file` (`.sqlite` optional) with `{debug, suppressErrors}`
    #[napi(constructor)]
    pub fn new(file: String, config: Option<Value>) -> napi::Result<Self> {
        let config = match config {
            Some(record) => StoreConfig::from_record(record).map_err(to_napi_error)?,
            None => StoreConfig::default(),
        };
        let store = Store::open(&file, config).map_err(to_napi_error)?;
        Ok(EasyDatabase { store })
    }

    #[napi]
    pub fn execute(&self, sql: String) -> napi::Result<()> {
        self.store.execute(&sql).map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn query(&self, sql: String) -> napi::Result<Vec<Value>> {
        let rows = self.store.query(&sql).map_err(to_napi_error)?;
        Ok(rows.into_iter().map(Value::Object).collect())
    }

    #[napi]
    pub fn create_table(
        &self,
        name: String,
        columns: Vec<Value>,
        if_not_exists: Option<bool>,
    ) -> napi::Result<()> {
        let columns = columns
            .into_iter()
            .map(Column::from_record)
            .collect::<crate::Result<Vec<_>>>()
            .map_err(to_napi_error)?;
        self.store
            .create_table(&name, &columns, if_not_exists.unwrap_or(true))
            .map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn insert(&self, table: String, values: Value) -> napi::Result<()> {
        let Value::Object(values) = values else {
            return Err(to_napi_error(Error::configuration("Values should be an object!")));
        };
        self.store.insert(&table, &values).map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn select(
        &self,
        table: String,
        where_conditions: Option<Vec<Value>>,
        columns: Option<Vec<String>>,
        raw: Option<bool>,
    ) -> napi::Result<Vec<Value>> {
        let where_conditions = conditions(where_conditions).map_err(to_napi_error)?;
        let columns = columns.unwrap_or_else(|| vec!["*".to_string()]);
        self.store
            .select(&table, &where_conditions, &columns[..], raw.unwrap_or(false))
            .map_err(to_napi_error)
    }

    #[napi]
    pub fn fetch_all(&self, table: String) -> napi::Result<Vec<Value>> {
        self.store.fetch_all(&table).map_err(to_napi_error)
    }

    #[napi]
    pub fn update(
        &self,
        table: String,
        where_conditions: Option<Vec<Value>>,
        column: String,
        value: Value,
    ) -> napi::Result<()> {
        let where_conditions = conditions(where_conditions).map_err(to_napi_error)?;
        self.store
            .update(&table, &where_conditions, &column, &value)
            .map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn delete_rows(&self, table: String, where_conditions: Vec<Value>) -> napi::Result<()> {
        let where_conditions = conditions(Some(where_conditions)).map_err(to_napi_error)?;
        self.store
            .delete_rows(&table, &where_conditions)
            .map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn drop_table(&self, table: String) -> napi::Result<()> {
        self.store.drop_table(&table).map_err(to_napi_error)?;
        Ok(())
    }
}
