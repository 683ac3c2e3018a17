//! Top-level matprop configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BatchConfig, ResearchConfig, StorageConfig, ValidationConfig};
use crate::constants::PROJECT_CONFIG_FILENAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`MATPROP_*`)
/// 3. Project config (`matprop.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatpropConfig {
    pub validation: ValidationConfig,
    pub research: ResearchConfig,
    pub storage: StorageConfig,
    pub batch: BatchConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub workers: Option<usize>,
    pub out_of_range_slack: Option<f64>,
    pub min_population: Option<usize>,
}

impl MatpropConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "loaded matprop config");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MatpropConfig) -> Result<(), ConfigError> {
        let fractions = [
            ("validation.out_of_range_slack", config.validation.out_of_range_slack),
            (
                "validation.low_confidence_threshold",
                config.validation.low_confidence_threshold,
            ),
            ("research.percentile_buffer", config.research.percentile_buffer),
            ("research.heuristic_spread", config.research.heuristic_spread),
            (
                "research.literature_confidence_floor",
                config.research.literature_confidence_floor,
            ),
            ("research.statistical_confidence", config.research.statistical_confidence),
            ("research.heuristic_confidence", config.research.heuristic_confidence),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }

        let research = &config.research;
        if research.lower_percentile >= research.upper_percentile || research.upper_percentile > 100
        {
            return Err(ConfigError::ValidationFailed {
                field: "research.upper_percentile".to_string(),
                message: "percentiles must satisfy lower < upper <= 100".to_string(),
            });
        }
        if research.min_population < 2 {
            return Err(ConfigError::ValidationFailed {
                field: "research.min_population".to_string(),
                message: "must be at least 2".to_string(),
            });
        }
        if config.storage.read_pool_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "storage.read_pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `MATPROP_DB_PATH`, `MATPROP_BATCH_WORKERS`, etc.
    fn apply_env_overrides(config: &mut MatpropConfig) {
        if let Ok(val) = std::env::var("MATPROP_DB_PATH") {
            config.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("MATPROP_BATCH_WORKERS") {
            if let Ok(v) = val.parse::<usize>() {
                config.batch.workers = v;
            }
        }
        if let Ok(val) = std::env::var("MATPROP_OUT_OF_RANGE_SLACK") {
            if let Ok(v) = val.parse::<f64>() {
                config.validation.out_of_range_slack = v;
            }
        }
        if let Ok(val) = std::env::var("MATPROP_MIN_POPULATION") {
            if let Ok(v) = val.parse::<usize>() {
                config.research.min_population = v;
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut MatpropConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.db_path {
            config.storage.db_path = v.clone();
        }
        if let Some(v) = o.workers {
            config.batch.workers = v;
        }
        if let Some(v) = o.out_of_range_slack {
            config.validation.out_of_range_slack = v;
        }
        if let Some(v) = o.min_population {
            config.research.min_population = v;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
