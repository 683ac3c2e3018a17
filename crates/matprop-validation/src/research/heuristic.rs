//! Spread around the observed values, used when the population is too small
//! for percentiles.

use matprop_core::config::ResearchConfig;
use matprop_core::models::ResearchedRange;
use matprop_core::RangeMethod;

/// Range from the smallest to the largest finite value, widened by the
/// configured spread on each side. Every input value lies inside the result.
///
/// `None` when there are no finite values or they are all zero: a relative
/// spread around zero is no range.
pub fn spanning(values: &[f64], unit: &str, config: &ResearchConfig) -> Option<ResearchedRange> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    let (lo, hi) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == 0.0 && hi == 0.0 {
        return None;
    }

    Some(ResearchedRange {
        min: lo - lo.abs() * config.heuristic_spread,
        max: hi + hi.abs() * config.heuristic_spread,
        unit: unit.to_string(),
        confidence: config.heuristic_confidence,
        method: RangeMethod::Heuristic,
    })
}
