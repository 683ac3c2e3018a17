//! # matprop-storage
//!
//! Backends for the category range store.
//!
//! - [`MemoryRangeStore`]: lock-guarded map, for tests and short-lived runs.
//! - [`SqliteRangeStore`]: single serialized writer plus a read pool,
//!   `PRAGMA user_version` migrations, append-only remediation log.
//!
//! Both implement [`matprop_core::IRangeStore`]. [`yaml`] moves the range
//! table in and out of the YAML shape the content layer consumes.

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod sqlite;
pub mod yaml;

pub use memory::MemoryRangeStore;
pub use sqlite::SqliteRangeStore;

use matprop_core::errors::StorageError;

/// Wrap a SQLite failure. Trigger aborts from the audit log map to
/// `AppendOnlyViolation`.
pub(crate) fn to_storage_err(e: rusqlite::Error) -> StorageError {
    let message = e.to_string();
    if message.contains("append-only") {
        StorageError::AppendOnlyViolation { message }
    } else {
        StorageError::SqliteError { message }
    }
}
