//! Error handling for matprop.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod data_integrity_error;
pub mod error_code;
pub mod matprop_error;
pub mod rule_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use data_integrity_error::DataIntegrityError;
pub use error_code::MatpropErrorCode;
pub use matprop_error::{MatpropError, MatpropResult};
pub use rule_error::RuleError;
pub use storage_error::StorageError;
