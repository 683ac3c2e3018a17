//! Connection management: one serialized writer, pooled readers.
//!
//! In-memory databases have no readers. Every in-memory connection is its
//! own database, so reads go through the writer.

pub mod pool;
pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use matprop_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::{configure, Role};
use crate::migrations;

pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open (or create) the database at `path`, migrate it, then open readers.
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: format!("open {}: {e}", path.display()),
        })?;
        let writer = Self::prepare(writer)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        tracing::debug!(path = %path.display(), readers = readers.len(), "range database opened");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory database. Migrated, single connection, no readers.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        Ok(Self {
            writer: Mutex::new(Self::prepare(writer)?),
            readers: None,
            path: None,
        })
    }

    fn prepare(conn: Connection) -> Result<Connection, StorageError> {
        configure(&conn, Role::Writer)?;
        migrations::run_migrations(&conn)?;
        Ok(conn)
    }

    /// Run `f` on the writer. Callers are serialized.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.writer.lock().map_err(|_| StorageError::LockPoisoned {
            what: "writer".to_string(),
        })?;
        f(&conn)
    }

    /// Run `f` on a pooled reader, or on the writer for in-memory databases.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.read(f),
            None => self.with_writer(f),
        }
    }

    /// Fold the WAL back into the main file.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(|e| StorageError::SqliteError {
                    message: format!("checkpoint: {e}"),
                })
        })
    }

    /// Current journal mode, lowercased (`wal` for file databases).
    pub fn journal_mode(&self) -> Result<String, StorageError> {
        self.with_writer(pragmas::journal_mode)
    }

    /// Number of pooled readers (0 in memory).
    pub fn reader_count(&self) -> usize {
        self.readers.as_ref().map_or(0, ReadPool::len)
    }

    /// None for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
