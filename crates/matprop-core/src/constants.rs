/// matprop version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Confidence assigned to a measurement whose record carries none.
pub const DEFAULT_MEASUREMENT_CONFIDENCE: f64 = 0.80;

/// Confidence values above 1.0 and up to this bound are read as percentages.
pub const PERCENT_CONFIDENCE_CEILING: f64 = 100.0;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "MATPROP_LOG";

/// Filter used when `MATPROP_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "matprop=info";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILENAME: &str = "matprop.toml";
