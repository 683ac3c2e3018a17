//! Schema migrations, tracked with `PRAGMA user_version`.
//!
//! Each migration runs in its own transaction and bumps `user_version` on
//! success, so a half-applied migration never leaves the version ahead of
//! the schema.

pub mod v001_category_ranges;
pub mod v002_remediation_log;

use matprop_core::errors::StorageError;
use rusqlite::Connection;

/// Ordered migration list. The version of entry `i` is `i + 1`.
const MIGRATIONS: &[&str] = &[
    v001_category_ranges::MIGRATION_SQL,
    v002_remediation_log::MIGRATION_SQL,
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = MIGRATIONS.len() as u32;

/// Read the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}

/// Apply every migration newer than the stored version.
pub fn run_migrations(conn: &Connection) -> Result<u32, StorageError> {
    let current = current_version(conn)?;
    if current > LATEST_VERSION {
        return Err(StorageError::MigrationFailed {
            version: current,
            message: format!("database schema is newer than this build (v{LATEST_VERSION})"),
        });
    }

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = idx as u32 + 1;
        let fail = |e: rusqlite::Error| StorageError::MigrationFailed {
            version,
            message: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(fail)?;
        tx.execute_batch(sql).map_err(fail)?;
        tx.pragma_update(None, "user_version", version).map_err(fail)?;
        tx.commit().map_err(fail)?;
        tracing::debug!(version, "applied migration");
    }

    Ok(LATEST_VERSION)
}
