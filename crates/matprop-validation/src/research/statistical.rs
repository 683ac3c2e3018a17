//! Percentile range over a category's observed population.

use matprop_core::config::ResearchConfig;
use matprop_core::models::ResearchedRange;
use matprop_core::RangeMethod;
use statrs::statistics::{Data, OrderStatistics};

/// `None` when fewer than `min_population` finite values are available.
pub fn infer(values: &[f64], unit: &str, config: &ResearchConfig) -> Option<ResearchedRange> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < config.min_population {
        return None;
    }

    let mut data = Data::new(finite);
    let lower = data.percentile(config.lower_percentile);
    let upper = data.percentile(config.upper_percentile);
    if !(lower.is_finite() && upper.is_finite()) {
        return None;
    }
    let (lower, upper) = (lower.min(upper), lower.max(upper));

    let span = upper - lower;
    let buffer = if span > 0.0 {
        span * config.percentile_buffer
    } else {
        upper.abs() * config.percentile_buffer
    };

    Some(ResearchedRange {
        min: lower - buffer,
        max: upper + buffer,
        unit: unit.to_string(),
        confidence: config.statistical_confidence,
        method: RangeMethod::Statistical,
    })
}
