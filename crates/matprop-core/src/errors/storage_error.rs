//! Storage-layer errors for the category range store.

use super::error_code::{self, MatpropErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("{what} lock poisoned")]
    LockPoisoned { what: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("remediation log is append-only: {message}")]
    AppendOnlyViolation { message: String },
}

impl MatpropErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::AppendOnlyViolation { .. } => error_code::APPEND_ONLY_VIOLATION,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
