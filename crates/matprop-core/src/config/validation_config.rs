use serde::{Deserialize, Serialize};

use super::defaults;

/// Validator thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fraction of the range span within which an out-of-range value is only
    /// a warning. Beyond it the value is an error.
    pub out_of_range_slack: f64,
    /// Measurements below this confidence get a `low_confidence` warning.
    pub low_confidence_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            out_of_range_slack: defaults::DEFAULT_OUT_OF_RANGE_SLACK,
            low_confidence_threshold: defaults::DEFAULT_LOW_CONFIDENCE_THRESHOLD,
        }
    }
}
