//! SQL for the two tables. Every function takes a borrowed connection so
//! callers decide between the writer and the read pool.

pub mod category_ranges;
pub mod remediation_log;

use chrono::{DateTime, SecondsFormat, Utc};
use matprop_core::errors::StorageError;
use matprop_core::RangeMethod;

pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization {
            message: format!("bad timestamp '{raw}': {e}"),
        })
}

pub(crate) fn parse_method(raw: &str) -> Result<RangeMethod, StorageError> {
    RangeMethod::parse_str(raw).ok_or_else(|| StorageError::Serialization {
        message: format!("unknown range method '{raw}'"),
    })
}
