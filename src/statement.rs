//! Statement builder - assembles SQL text from descriptors
//!
//! Every function validates its arguments before producing any text, so a
//! malformed call fails with [`Error::Configuration`] without reaching the
//! engine.

use serde_json::{Map, Value};

use crate::condition::{self, WhereCondition};
use crate::error::{Error, Result};
use crate::literal;
use crate::schema::Column;

fn check_name(name: &str, what: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::configuration(format!("{} should be valid string!", what)));
    }
    Ok(())
}

fn where_clause(conditions: &[WhereCondition]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", condition::encode_all(conditions))
    }
}

/// `CREATE TABLE [IF NOT EXISTS] <name> (<col>, ...)`
pub fn create_table(name: &str, columns: &[Column], if_not_exists: bool) -> Result<String> {
    check_name(name, "Table name")?;
    if columns.is_empty() {
        return Err(Error::configuration("Columns should have at least one element!"));
    }
    for column in columns {
        check_name(column.name(), "Column name")?;
    }

    let columns = columns
        .iter()
        .map(Column::encode)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "CREATE TABLE {}{} ({})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        name,
        columns
    ))
}

/// `INSERT INTO <table> (<keys>) VALUES (<values>)`, or `DEFAULT VALUES`
/// when `values` is empty.
pub fn insert(table: &str, values: &Map<String, Value>) -> Result<String> {
    check_name(table, "Table name")?;
    if values.is_empty() {
        return Ok(format!("INSERT INTO {} DEFAULT VALUES", table));
    }

    let mut keys = Vec::with_capacity(values.len());
    let mut encoded = Vec::with_capacity(values.len());
    for (key, value) in values {
        check_name(key, "Column name")?;
        keys.push(key.as_str());
        encoded.push(literal::encode(value));
    }
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        keys.join(", "),
        encoded.join(", ")
    ))
}

/// `SELECT <columns> FROM <table> [WHERE ...]`
pub fn select<S: AsRef<str>>(
    table: &str,
    conditions: &[WhereCondition],
    columns: &[S],
) -> Result<String> {
    check_name(table, "Table name")?;
    if columns.is_empty() {
        return Err(Error::configuration("Select should have at least one element!"));
    }
    for column in columns {
        check_name(column.as_ref(), "Select column")?;
    }

    let columns = columns.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ");
    Ok(format!(
        "SELECT {} FROM {}{}",
        columns,
        table,
        where_clause(conditions)
    ))
}

/// `UPDATE <table> SET <column> = <value> [WHERE ...]`
///
/// An empty condition list updates every row.
pub fn update(
    table: &str,
    conditions: &[WhereCondition],
    column: &str,
    value: &Value,
) -> Result<String> {
    check_name(table, "Table name")?;
    check_name(column, "Column name")?;
    Ok(format!(
        "UPDATE {} SET {} = {}{}",
        table,
        column,
        literal::encode(value),
        where_clause(conditions)
    ))
}

/// `DELETE FROM <table> WHERE ...`
///
/// At least one condition is required; clearing a table has to go through
/// raw SQL.
pub fn delete(table: &str, conditions: &[WhereCondition]) -> Result<String> {
    check_name(table, "Table name")?;
    if conditions.is_empty() {
        return Err(Error::configuration(
            "Where conditions should have at least one element!",
        ));
    }
    Ok(format!("DELETE FROM {}{}", table, where_clause(conditions)))
}

pub fn drop_table(table: &str) -> Result<String> {
    check_name(table, "Table name")?;
    Ok(format!("DROP TABLE {}", table))
}
