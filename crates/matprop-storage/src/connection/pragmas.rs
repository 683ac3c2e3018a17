//! Per-connection PRAGMA setup.

use matprop_core::errors::StorageError;
use rusqlite::Connection;

/// What a connection is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The single serialized writer. Owns the journal mode.
    Writer,
    /// A pooled reader, refused writes at the SQLite level.
    Reader,
}

impl Role {
    fn pragmas(self) -> &'static str {
        match self {
            Self::Writer => {
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA temp_store = MEMORY;"
            }
            Self::Reader => {
                "PRAGMA query_only = ON;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA temp_store = MEMORY;"
            }
        }
    }
}

/// Apply the pragmas for `role`. Readers are set query-only.
pub fn configure(conn: &Connection, role: Role) -> Result<(), StorageError> {
    conn.execute_batch(role.pragmas())
        .map_err(|e| StorageError::SqliteError {
            message: format!("{role:?} pragmas: {e}"),
        })
}

/// Current journal mode, lowercased (`wal`, `memory`, ...).
pub fn journal_mode(conn: &Connection) -> Result<String, StorageError> {
    conn.pragma_query_value(None, "journal_mode", |row| row.get::<_, String>(0))
        .map(|mode| mode.to_lowercase())
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
