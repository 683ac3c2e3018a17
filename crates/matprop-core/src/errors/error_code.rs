//! MatpropErrorCode trait for the reporting boundary.

/// Every error enum maps to a stable code string so reporting layers can
/// group failures without parsing messages.
pub trait MatpropErrorCode {
    /// Returns the error code string (e.g., "RULE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const APPEND_ONLY_VIOLATION: &str = "APPEND_ONLY_VIOLATION";
pub const DATA_INTEGRITY: &str = "DATA_INTEGRITY";
pub const CANCELLED: &str = "CANCELLED";
