//! Round-robin pool of read-only connections for file-backed stores.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use matprop_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};

use super::pragmas::{configure, Role};

/// Upper bound on pooled readers, whatever the config asks for.
pub const MAX_READERS: usize = 8;

pub struct ReadPool {
    slots: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    /// Open `size` readers (clamped to `1..=MAX_READERS`). The schema must
    /// already exist.
    pub fn open(path: &Path, size: usize) -> Result<Self, StorageError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let slots = (0..size.clamp(1, MAX_READERS))
            .map(|_| {
                let conn = Connection::open_with_flags(path, flags).map_err(|e| {
                    StorageError::SqliteError {
                        message: format!("open reader {}: {e}", path.display()),
                    }
                })?;
                configure(&conn, Role::Reader)?;
                Ok(Mutex::new(conn))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok(Self {
            slots,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader in turn.
    pub fn read<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        let conn = self.slots[slot]
            .lock()
            .map_err(|_| StorageError::LockPoisoned {
                what: format!("reader {slot}"),
            })?;
        f(&conn)
    }

    /// Number of reader connections in the pool.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
