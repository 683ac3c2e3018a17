//! Writes run in `BEGIN IMMEDIATE` transactions so the SQLite write lock is
//! held from the first statement, not upgraded mid-transaction.

use matprop_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Run `f` in an immediate transaction. Commits on `Ok`; any error, or a
/// panic in `f`, rolls back when the transaction drops.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        StorageError::SqliteError {
            message: format!("begin immediate: {e}"),
        }
    })?;
    let value = f(&tx)?;
    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("commit: {e}"),
    })?;
    Ok(value)
}
