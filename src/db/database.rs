//! Opening SQLite database files

use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::Result;

/// Extension every database file carries
pub const FILE_EXTENSION: &str = ".sqlite";

/// Name that opens a private in-memory database
pub const MEMORY: &str = ":memory:";

/// Path of the database file for `file`, with or without the extension.
pub fn database_path(file: &str) -> PathBuf {
    let stem = file.strip_suffix(FILE_EXTENSION).unwrap_or(file);
    PathBuf::from(format!("{}{}", stem, FILE_EXTENSION))
}

/// Open (or create) the database named `file`.
pub fn open_database(file: &str) -> Result<Connection> {
    let conn = if file == MEMORY {
        Connection::open_in_memory()?
    } else {
        Connection::open(database_path(file))?
    };

    // Enable extended result codes for better error handling
    conn.execute_batch(
        "PRAGMA extended_result_codes = ON;
         PRAGMA foreign_keys = ON;",
    )?;

    Ok(conn)
}
