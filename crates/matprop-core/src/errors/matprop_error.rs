//! Top-level error aggregating subsystem errors via `From` conversions.

use super::error_code::{self, MatpropErrorCode};
use super::{ConfigError, DataIntegrityError, RuleError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum MatpropError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl MatpropErrorCode for MatpropError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::DataIntegrity(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

pub type MatpropResult<T> = Result<T, MatpropError>;
