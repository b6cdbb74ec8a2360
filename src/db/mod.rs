//! SQLite storage for sync history and the subtitle blacklist.
//!
//! The schema is embedded in the binary and applied at open time. Query
//! modules are plain functions taking a `&Connection`; the sync subsystem is
//! single-threaded so there is no connection pooling here.

pub mod blacklist;
pub mod history;

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = include_str!("schema.sql");

/// Open (creating if needed) the database at the given path and apply the
/// schema.
pub fn open(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)
        .map_err(|e| Error::database(format!("Failed to open {}: {}", db_path.display(), e)))?;

    init_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database. Used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_applies_cleanly() {
        let conn = open_in_memory().unwrap();
        // Applying twice must be idempotent.
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('history', 'history_movie', 'blacklist', 'blacklist_movie')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }
}
