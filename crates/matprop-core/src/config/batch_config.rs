use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads. 0 = rayon default (one per core).
    pub workers: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: defaults::DEFAULT_BATCH_WORKERS,
        }
    }
}
