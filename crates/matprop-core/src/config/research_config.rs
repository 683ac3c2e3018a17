use serde::{Deserialize, Serialize};

use super::defaults;

/// Range research strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Minimum number of observed values before statistical inference is used.
    pub min_population: usize,
    /// Lower percentile of the observed population (0–100).
    pub lower_percentile: usize,
    /// Upper percentile of the observed population (0–100).
    pub upper_percentile: usize,
    /// Buffer added on both sides of the percentile range, as a fraction of its span.
    pub percentile_buffer: f64,
    /// Relative spread applied around a single observed value.
    pub heuristic_spread: f64,
    /// Literature entries below this confidence are ignored.
    pub literature_confidence_floor: f64,
    pub statistical_confidence: f64,
    pub heuristic_confidence: f64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            min_population: defaults::DEFAULT_MIN_POPULATION,
            lower_percentile: defaults::DEFAULT_LOWER_PERCENTILE,
            upper_percentile: defaults::DEFAULT_UPPER_PERCENTILE,
            percentile_buffer: defaults::DEFAULT_PERCENTILE_BUFFER,
            heuristic_spread: defaults::DEFAULT_HEURISTIC_SPREAD,
            literature_confidence_floor: defaults::DEFAULT_LITERATURE_CONFIDENCE_FLOOR,
            statistical_confidence: defaults::DEFAULT_STATISTICAL_CONFIDENCE,
            heuristic_confidence: defaults::DEFAULT_HEURISTIC_CONFIDENCE,
        }
    }
}
