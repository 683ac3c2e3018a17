//! SqliteRangeStore: owns the DatabaseManager and implements IRangeStore.

use std::path::Path;

use matprop_core::config::StorageConfig;
use matprop_core::errors::{MatpropResult, StorageError};
use matprop_core::{CategoryRange, IRangeStore, RemediationRecord};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{category_ranges, remediation_log};

/// Durable range store. Writes go through the single writer under
/// BEGIN IMMEDIATE; reads use the pool when the database is file-backed.
pub struct SqliteRangeStore {
    db: DatabaseManager,
}

impl SqliteRangeStore {
    /// Open (and migrate) a database file.
    pub fn open(path: &Path, read_pool_size: usize) -> MatpropResult<Self> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        tracing::info!(path = %path.display(), "opened range store");
        Ok(Self { db })
    }

    /// Open the database named in the storage config.
    pub fn from_config(config: &StorageConfig) -> MatpropResult<Self> {
        Self::open(Path::new(&config.db_path), config.read_pool_size)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> MatpropResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Access the connection manager (checkpoints, raw queries in tests).
    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Number of stored ranges.
    pub fn range_count(&self) -> MatpropResult<i64> {
        Ok(self.db.with_reader(category_ranges::count)?)
    }

    /// Number of remediation log entries.
    pub fn record_count(&self) -> MatpropResult<i64> {
        Ok(self.db.with_reader(remediation_log::count)?)
    }
}

impl IRangeStore for SqliteRangeStore {
    fn lookup(&self, category: &str, property: &str) -> MatpropResult<Option<CategoryRange>> {
        Ok(self
            .db
            .with_reader(|conn| category_ranges::get(conn, category, property))?)
    }

    fn upsert(&self, range: &CategoryRange) -> MatpropResult<()> {
        range.check()?;
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| category_ranges::upsert(tx, range))
        })?;
        tracing::debug!(key = %range.key(), method = %range.method, "upserted range");
        Ok(())
    }

    fn insert_if_absent(&self, range: &CategoryRange) -> MatpropResult<CategoryRange> {
        range.check()?;
        let stored = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let inserted = category_ranges::insert_if_absent(tx, range)?;
                let stored = category_ranges::get(tx, &range.category, &range.property)?
                    .ok_or_else(|| StorageError::SqliteError {
                        message: format!("range {} vanished after insert", range.key()),
                    })?;
                if !inserted {
                    tracing::debug!(key = %range.key(), "range already present; keeping stored entry");
                }
                Ok(stored)
            })
        })?;
        Ok(stored)
    }

    fn ranges_for_category(&self, category: &str) -> MatpropResult<Vec<CategoryRange>> {
        Ok(self
            .db
            .with_reader(|conn| category_ranges::for_category(conn, category))?)
    }

    fn all_ranges(&self) -> MatpropResult<Vec<CategoryRange>> {
        Ok(self.db.with_reader(category_ranges::all)?)
    }

    fn persist_remediation(
        &self,
        range: &CategoryRange,
        record: &RemediationRecord,
        replace: bool,
    ) -> MatpropResult<bool> {
        range.check()?;
        let written = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let written = if replace {
                    category_ranges::upsert(tx, range)?;
                    true
                } else {
                    category_ranges::insert_if_absent(tx, range)?
                };
                if written {
                    remediation_log::insert(tx, record)?;
                }
                Ok(written)
            })
        })?;
        tracing::debug!(key = %range.key(), written, "persisted remediation");
        Ok(written)
    }

    fn append_record(&self, record: &RemediationRecord) -> MatpropResult<()> {
        self.db
            .with_writer(|conn| remediation_log::insert(conn, record).map(|_| ()))?;
        Ok(())
    }

    fn records(&self) -> MatpropResult<Vec<RemediationRecord>> {
        Ok(self.db.with_reader(remediation_log::all)?)
    }
}
