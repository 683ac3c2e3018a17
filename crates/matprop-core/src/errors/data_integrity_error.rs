//! Structurally impossible data. Never coerced or clamped.

use super::error_code::{self, MatpropErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataIntegrityError {
    #[error("property '{property}' has a non-finite value")]
    NonFiniteValue { property: String },

    #[error("property '{property}' has a numeric value but no unit")]
    EmptyUnit { property: String },

    #[error("property '{property}' has confidence {confidence} outside [0, 1]")]
    ConfidenceOutOfBounds { property: String, confidence: f64 },

    #[error("range for '{property}' is inverted: min {min} > max {max}")]
    InvertedRange { property: String, min: f64, max: f64 },

    #[error("qualitative range for '{property}' cannot carry numeric bounds")]
    QualitativeBounds { property: String },

    #[error("malformed material record: {message}")]
    MalformedRecord { message: String },
}

impl MatpropErrorCode for DataIntegrityError {
    fn error_code(&self) -> &'static str {
        error_code::DATA_INTEGRITY
    }
}
