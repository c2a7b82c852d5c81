//! sqlite-easy - typed schema declarations and statement building over SQLite
//!
//! Columns and where conditions are declared as validated descriptors, turned
//! into SQL text by [`statement`], and run through a [`Store`] that owns one
//! SQLite connection (or any other [`Engine`]).
//!
//! ```rust
//! use serde_json::json;
//! use sqlite_easy::{Column, ColumnOptions, Store, StoreConfig, WhereCondition};
//!
//! # fn main() -> sqlite_easy::Result<()> {
//! let store = Store::open(":memory:", StoreConfig::default())?;
//! store.create_table(
//!     "users",
//!     &[
//!         Column::integer("id", ColumnOptions::new().primary_key().auto_increment())?,
//!         Column::text("name", ColumnOptions::new().not_null())?,
//!         Column::tiny_integer("age", ColumnOptions::new().default_value(18))?,
//!     ],
//!     true,
//! )?;
//! store.insert("users", json!({"name": "Ann"}).as_object().unwrap())?;
//!
//! let adults = store.select(
//!     "users",
//!     &[WhereCondition::new("age", sqlite_easy::Operator::GreaterOrEquals, 18)?],
//!     &["name"],
//!     false,
//! )?;
//! assert_eq!(adults, vec![json!("Ann")]);
//! # Ok(())
//! # }
//! ```

pub mod condition;
pub mod db;
mod error;
pub mod literal;
mod models;
pub mod schema;
pub mod statement;
mod store;

#[cfg(feature = "napi")]
pub mod node;

pub use condition::{ConditionSpec, Operator, WhereCondition};
pub use db::{Engine, Row};
pub use error::{Error, Result};
pub use models::StoreConfig;
pub use schema::{Column, ColumnOptions, ColumnSpec, ColumnType};
pub use store::Store;
