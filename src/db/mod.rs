//! Database module - the SQLite engine behind a [`Store`](crate::Store)

mod database;
mod engine;
mod row;

pub use database::{database_path, open_database, FILE_EXTENSION, MEMORY};
pub use engine::{Engine, Row};
pub use row::sqlite_to_json;
