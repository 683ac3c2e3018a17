//! Inputs and outputs of range research.

use serde::{Deserialize, Serialize};

use super::category_range::RangeMethod;

/// Everything a researcher may look at for one (category, property).
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchRequest {
    pub category: String,
    /// Canonical property name.
    pub property: String,
    /// Canonical unit; observed values are already converted to it.
    pub unit: String,
    /// Quantitative values of this property across the category's population.
    pub observed_values: Vec<f64>,
    /// The value on the material that triggered research, if quantitative.
    pub current_value: Option<f64>,
    /// True when the rule marks the property as inherently qualitative.
    pub qualitative: bool,
}

/// A bound the researcher is willing to stand behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchedRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub confidence: f64,
    pub method: RangeMethod,
}

/// Why no range could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminableReason {
    /// Qualitative properties never get numeric bounds.
    Qualitative,
    /// No numeric signal to work from.
    InsufficientData,
}

impl UndeterminableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qualitative => "qualitative",
            Self::InsufficientData => "insufficient data",
        }
    }
}

/// Research outcome. `Undeterminable` is a first-class answer, not a
/// low-confidence range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RangeResult {
    Found(ResearchedRange),
    Undeterminable { reason: UndeterminableReason },
}

impl RangeResult {
    pub fn undeterminable(reason: UndeterminableReason) -> Self {
        Self::Undeterminable { reason }
    }
}
