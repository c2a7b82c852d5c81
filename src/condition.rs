//! Where conditions - single column predicates for SELECT, UPDATE and DELETE

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::literal;

/// Comparison operators for WHERE clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
    Is,
    IsNot,
    In,
    NotIn,
    Between,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Less => "<",
            Operator::LessOrEquals => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEquals => ">=",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_uppercase().as_str() {
            "=" | "==" => Ok(Operator::Equals),
            "!=" | "<>" => Ok(Operator::NotEquals),
            "<" => Ok(Operator::Less),
            "<=" => Ok(Operator::LessOrEquals),
            ">" => Ok(Operator::Greater),
            ">=" => Ok(Operator::GreaterOrEquals),
            "IS" => Ok(Operator::Is),
            "IS NOT" => Ok(Operator::IsNot),
            "IN" => Ok(Operator::In),
            "NOT IN" => Ok(Operator::NotIn),
            "BETWEEN" => Ok(Operator::Between),
            _ => Err(Error::configuration(format!("Unknown operator: {}", s))),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

/// A condition as a single named record:
/// `{"column": "age", "operator": ">=", "value": 18}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub column: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

/// `<column> <operator> <value>` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct WhereCondition {
    column: String,
    operator: Operator,
    value: Value,
}

impl WhereCondition {
    /// Build a condition. `IN` and `NOT IN` take an array of candidates,
    /// `BETWEEN` an array holding exactly the lower and upper bound.
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Result<Self> {
        let column = column.into();
        let value = value.into();

        if column.trim().is_empty() {
            return Err(Error::configuration("Where condition column should be valid string!"));
        }

        match (operator, &value) {
            (Operator::In | Operator::NotIn, Value::Array(_)) => {}
            (Operator::In | Operator::NotIn, _) => {
                return Err(Error::configuration(format!(
                    "{} condition on {} should have an array value",
                    operator, column
                )));
            }
            (Operator::Between, Value::Array(bounds)) if bounds.len() == 2 => {}
            (Operator::Between, _) => {
                return Err(Error::configuration(format!(
                    "BETWEEN condition on {} should have exactly two bounds",
                    column
                )));
            }
            _ => {}
        }

        Ok(WhereCondition {
            column,
            operator,
            value,
        })
    }

    pub fn from_spec(spec: ConditionSpec) -> Result<Self> {
        WhereCondition::new(spec.column, spec.operator, spec.value)
    }

    /// Build a condition from a JSON record shaped like [`ConditionSpec`].
    pub fn from_record(record: Value) -> Result<Self> {
        let spec: ConditionSpec = serde_json::from_value(record)?;
        WhereCondition::from_spec(spec)
    }

    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        WhereCondition::new(column, Operator::Equals, value)
    }

    pub fn not_equals(column: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        WhereCondition::new(column, Operator::NotEquals, value)
    }

    pub fn is_null(column: impl Into<String>) -> Result<Self> {
        WhereCondition::new(column, Operator::Is, Value::Null)
    }

    pub fn is_in(column: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        WhereCondition::new(column, Operator::In, Value::Array(values))
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Result<Self> {
        WhereCondition::new(column, Operator::Between, vec![low.into(), high.into()])
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn encode(&self) -> String {
        let value = match (&self.operator, &self.value) {
            (Operator::Between, Value::Array(bounds)) => bounds
                .iter()
                .map(literal::encode)
                .collect::<Vec<_>>()
                .join(" AND "),
            (_, value) => literal::encode(value),
        };
        format!("{} {} {}", self.column, self.operator, value)
    }
}

/// Join encoded conditions with AND
pub fn encode_all(conditions: &[WhereCondition]) -> String {
    conditions
        .iter()
        .map(WhereCondition::encode)
        .collect::<Vec<_>>()
        .join(" AND ")
}
