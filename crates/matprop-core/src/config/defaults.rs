// Single source of truth for all default values.

// --- Validation ---
pub const DEFAULT_OUT_OF_RANGE_SLACK: f64 = 0.10;
pub const DEFAULT_LOW_CONFIDENCE_THRESHOLD: f64 = 0.70;

// --- Research ---
pub const DEFAULT_MIN_POPULATION: usize = 5;
pub const DEFAULT_LOWER_PERCENTILE: usize = 5;
pub const DEFAULT_UPPER_PERCENTILE: usize = 95;
pub const DEFAULT_PERCENTILE_BUFFER: f64 = 0.05;
pub const DEFAULT_HEURISTIC_SPREAD: f64 = 0.20;
pub const DEFAULT_LITERATURE_CONFIDENCE_FLOOR: f64 = 0.90;
pub const DEFAULT_STATISTICAL_CONFIDENCE: f64 = 0.75;
pub const DEFAULT_HEURISTIC_CONFIDENCE: f64 = 0.60;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "matprop.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Batch ---
/// 0 lets rayon pick the worker count.
pub const DEFAULT_BATCH_WORKERS: usize = 0;
