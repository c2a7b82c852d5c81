//! Column descriptors - typed column definitions for CREATE TABLE

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::expression::default_clause;
use crate::error::{Error, Result};
use crate::literal;

/// SQL column families a [`Column`] can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    /// Null type
    Null,
    /// SQLite's 64-bit signed INTEGER
    Integer,
    /// 8-bit integer (TINYINT)
    TinyInt,
    /// 16-bit integer (SMALLINT)
    SmallInt,
    /// 24-bit integer (MEDIUMINT)
    MediumInt,
    /// 32-bit integer (INT)
    Int,
    /// 64-bit integer (BIGINT)
    BigInt,
    /// Real/Float type (REAL)
    Real,
    /// Text type (TEXT)
    Text,
    /// Blob/Binary type (BLOB)
    Blob,
}

impl ColumnType {
    /// Get type from string name (case insensitive). Character and floating
    /// point aliases collapse onto TEXT and REAL. An `UNSIGNED` prefix is
    /// accepted on the sized integer types, so every [`sql_type`](Self::sql_type)
    /// output parses back.
    pub fn parse_type(s: &str) -> Option<ColumnType> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        match normalized.strip_prefix("UNSIGNED ") {
            Some(rest) => Self::parse_plain(rest).filter(ColumnType::is_sized),
            None => Self::parse_plain(&normalized),
        }
    }

    /// Whether a declared type name carries the `UNSIGNED` prefix
    pub fn is_unsigned_name(s: &str) -> bool {
        s.split_whitespace()
            .next()
            .map_or(false, |word| word.eq_ignore_ascii_case("UNSIGNED"))
    }

    fn parse_plain(s: &str) -> Option<ColumnType> {
        match s {
            "NULL" => Some(ColumnType::Null),
            "INTEGER" => Some(ColumnType::Integer),
            "TINYINT" => Some(ColumnType::TinyInt),
            "SMALLINT" | "INT2" => Some(ColumnType::SmallInt),
            "MEDIUMINT" => Some(ColumnType::MediumInt),
            "INT" => Some(ColumnType::Int),
            "BIGINT" | "BIG INT" | "INT8" => Some(ColumnType::BigInt),
            "REAL" | "DOUBLE" | "DOUBLE PRECISION" | "FLOAT" => Some(ColumnType::Real),
            "TEXT" | "CHARACTER" | "VARCHAR" | "VARYING CHARACTER" | "NCHAR"
            | "NATIVE CHARACTER" | "NVARCHAR" | "CLOB" => Some(ColumnType::Text),
            "BLOB" => Some(ColumnType::Blob),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Null => "NULL",
            ColumnType::Integer => "INTEGER",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::MediumInt => "MEDIUMINT",
            ColumnType::Int => "INT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }

    pub fn is_integer(&self) -> bool {
        self.bits().is_some()
    }

    /// Whether the `signed` option changes the declared type and range
    pub fn is_sized(&self) -> bool {
        self.is_integer() && *self != ColumnType::Integer
    }

    fn bits(&self) -> Option<u32> {
        match self {
            ColumnType::Integer | ColumnType::BigInt => Some(64),
            ColumnType::TinyInt => Some(8),
            ColumnType::SmallInt => Some(16),
            ColumnType::MediumInt => Some(24),
            ColumnType::Int => Some(32),
            _ => None,
        }
    }

    /// Inclusive `[min, max]` a default may take, for integer types only.
    ///
    /// Unsigned BIGINT reaches `u64::MAX`, past what SQLite's INTEGER storage
    /// holds; defaults above `i64::MAX` are accepted here and SQLite stores
    /// them as REAL.
    pub fn integer_range(&self, signed: bool) -> Option<(i128, i128)> {
        let bits = self.bits()?;
        if signed || !self.is_sized() {
            Some((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
        } else {
            Some((0, (1i128 << bits) - 1))
        }
    }

    /// Declared type as written into CREATE TABLE
    pub fn sql_type(&self, signed: bool) -> String {
        if self.is_sized() && !signed {
            format!("UNSIGNED {}", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ColumnType::Null => "Null",
            ColumnType::Integer => "Integer",
            ColumnType::TinyInt => "Tiny integer",
            ColumnType::SmallInt => "Small integer",
            ColumnType::MediumInt => "Medium integer",
            ColumnType::Int => "INT",
            ColumnType::BigInt => "Big integer",
            ColumnType::Real => "Real",
            ColumnType::Text => "String",
            ColumnType::Blob => "Blob",
        }
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnType::parse_type(s)
            .ok_or_else(|| Error::configuration(format!("Unknown SQLite type: {}", s)))
    }
}

impl TryFrom<String> for ColumnType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ColumnType> for String {
    fn from(t: ColumnType) -> Self {
        t.as_str().to_string()
    }
}

/// Optional column settings. Every field defaults to off/absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnOptions {
    pub not_null: bool,
    /// Literal default, type-checked against the column family
    pub default: Option<Value>,
    /// SQL expression default such as `CURRENT_TIMESTAMP`
    pub default_expression: Option<String>,
    pub primary_key: bool,
    pub auto_increment: bool,
    /// Only meaningful for sized integer types; unsigned when false
    pub signed: bool,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_expression(mut self, expression: impl Into<String>) -> Self {
        self.default_expression = Some(expression.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }
}

/// A column as a single named record:
/// `{"name": "age", "type": "TINYINT", "notNull": true, "default": 18}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(flatten)]
    pub options: ColumnOptions,
}

/// A validated, immutable column definition
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    options: ColumnOptions,
    default_clause: Option<String>,
}

impl Column {
    /// Validate `options` against `column_type` and build the column.
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        mut options: ColumnOptions,
    ) -> Result<Self> {
        // a null default means no default, same as an absent record key
        if options.default == Some(Value::Null) {
            options.default = None;
        }
        let default_clause = validate(column_type, &options)?;
        Ok(Column {
            name: name.into(),
            column_type,
            options,
            default_clause,
        })
    }

    pub fn from_spec(spec: ColumnSpec) -> Result<Self> {
        Column::new(spec.name, spec.column_type, spec.options)
    }

    /// Build a column from a JSON record shaped like [`ColumnSpec`].
    ///
    /// An `UNSIGNED ...` type name cannot be combined with `signed: true`.
    pub fn from_record(record: Value) -> Result<Self> {
        let unsigned_name = record
            .get("type")
            .and_then(Value::as_str)
            .map_or(false, ColumnType::is_unsigned_name);
        let spec: ColumnSpec = serde_json::from_value(record)?;
        if unsigned_name && spec.options.signed {
            return Err(Error::configuration(format!(
                "Column {} is declared UNSIGNED but marked signed",
                spec.name
            )));
        }
        Column::from_spec(spec)
    }

    pub fn null(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Null, options)
    }

    pub fn integer(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Integer, options)
    }

    pub fn tiny_integer(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::TinyInt, options)
    }

    pub fn small_integer(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::SmallInt, options)
    }

    pub fn medium_integer(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::MediumInt, options)
    }

    pub fn int(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Int, options)
    }

    pub fn big_integer(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::BigInt, options)
    }

    pub fn real(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Real, options)
    }

    pub fn text(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Text, options)
    }

    pub fn blob(name: impl Into<String>, options: ColumnOptions) -> Result<Self> {
        Column::new(name, ColumnType::Blob, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn options(&self) -> &ColumnOptions {
        &self.options
    }

    pub fn sql_type(&self) -> String {
        self.column_type.sql_type(self.options.signed)
    }

    /// Column definition as it appears inside CREATE TABLE:
    /// `name type [NOT NULL] [DEFAULT x] [PRIMARY KEY] [AUTOINCREMENT]`
    pub fn encode(&self) -> String {
        let mut parts = vec![self.name.clone(), self.sql_type()];
        if self.options.not_null {
            parts.push("NOT NULL".to_string());
        }
        if let Some(clause) = &self.default_clause {
            parts.push(format!("DEFAULT {}", clause));
        }
        if self.options.primary_key {
            parts.push("PRIMARY KEY".to_string());
        }
        if self.options.auto_increment {
            parts.push("AUTOINCREMENT".to_string());
        }
        parts.join(" ")
    }
}

/// Check the options for `column_type` and render the DEFAULT operand.
fn validate(column_type: ColumnType, options: &ColumnOptions) -> Result<Option<String>> {
    let label = column_type.label();

    if options.auto_increment {
        if !column_type.is_integer() {
            return Err(Error::configuration(format!(
                "{} column cannot use AUTOINCREMENT",
                label
            )));
        }
        if !options.primary_key {
            return Err(Error::configuration(
                "AUTOINCREMENT can only be used on PRIMARY KEY columns",
            ));
        }
    }

    match (&options.default, &options.default_expression) {
        (Some(_), Some(_)) => Err(Error::configuration(
            "Column cannot have both a default value and a default expression",
        )),
        (None, None) => Ok(None),
        (_, _) if column_type == ColumnType::Null => Err(Error::configuration(
            "Null column cannot have a default",
        )),
        (None, Some(expression)) => default_clause(expression).map(Some).ok_or_else(|| {
            Error::configuration(format!("Not an SQL expression: {}", expression))
        }),
        (Some(value), None) => {
            check_default(column_type, options.signed, value)?;
            Ok(Some(literal::encode(value)))
        }
    }
}

fn check_default(column_type: ColumnType, signed: bool, value: &Value) -> Result<()> {
    let label = column_type.label();
    match column_type {
        ColumnType::Real => match value {
            Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => Ok(()),
            _ => Err(Error::configuration(format!(
                "{} column should have float as default",
                label
            ))),
        },
        ColumnType::Text => match value {
            Value::String(_) => Ok(()),
            _ => Err(Error::configuration(format!(
                "{} column should have string as default",
                label
            ))),
        },
        ColumnType::Blob => match value {
            Value::Array(_) | Value::Object(_) => Err(Error::configuration(format!(
                "{} column should have a scalar default",
                label
            ))),
            _ => Ok(()),
        },
        ColumnType::Null => Err(Error::configuration("Null column cannot have a default")),
        _ => {
            let (min, max) = column_type
                .integer_range(signed)
                .ok_or_else(|| Error::configuration(format!("{} is not an integer", label)))?;
            let number = integer_value(value).ok_or_else(|| {
                Error::configuration(format!("{} column should have integer as default", label))
            })?;
            if number < min || number > max {
                return Err(Error::configuration(format!(
                    "{} column should be {} to {}.",
                    label, min, max
                )));
            }
            Ok(())
        }
    }
}

/// Whole-number value of a JSON number. Floats qualify only when finite and
/// without a fractional part.
fn integer_value(value: &Value) -> Option<i128> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    // saturates outside i128, which every range check then rejects
    Some(f as i128)
}
