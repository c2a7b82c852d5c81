//! Schema descriptors - column types, column definitions and default expressions

mod column;
mod expression;

pub use column::{Column, ColumnOptions, ColumnSpec, ColumnType};
pub use expression::{check_sql_expression, is_sql_expression, ExpressionKind};
