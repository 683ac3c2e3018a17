//! RangeResearcher: derive a bound for a (category, property) with no stored range.
//!
//! Strategies, first success wins:
//! 1. literature table
//! 2. percentile range over the observed population
//! 3. ±spread around the span of the observed values and the current value
//!
//! Qualitative properties and inputs with no numeric signal are
//! `Undeterminable`. This module never persists and never retries.

pub mod heuristic;
pub mod literature;
pub mod statistical;

use matprop_core::config::ResearchConfig;
use matprop_core::models::{RangeResult, ResearchRequest, UndeterminableReason};
use matprop_core::IRangeResearcher;

#[derive(Debug, Clone, Default)]
pub struct RangeResearcher {
    config: ResearchConfig,
}

impl RangeResearcher {
    /// Researcher with the given thresholds and spreads.
    pub fn new(config: ResearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }
}

impl IRangeResearcher for RangeResearcher {
    fn research(&self, request: &ResearchRequest) -> RangeResult {
        if request.qualitative {
            return RangeResult::undeterminable(UndeterminableReason::Qualitative);
        }

        if let Some(found) = literature::lookup(
            &request.category,
            &request.property,
            self.config.literature_confidence_floor,
        ) {
            return RangeResult::Found(found);
        }

        if let Some(found) =
            statistical::infer(&request.observed_values, &request.unit, &self.config)
        {
            return RangeResult::Found(found);
        }

        let mut values = request.observed_values.clone();
        values.extend(request.current_value);
        match heuristic::spanning(&values, &request.unit, &self.config) {
            Some(found) => RangeResult::Found(found),
            None => RangeResult::undeterminable(UndeterminableReason::InsufficientData),
        }
    }
}
