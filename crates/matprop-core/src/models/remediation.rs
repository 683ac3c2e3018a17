use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category_range::{CategoryRange, RangeMethod};

/// An entry in the append-only remediation audit log.
///
/// Distinct from the mutable store entry it produced: the store keeps the
/// current bound, the log keeps every bound that was ever researched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationRecord {
    /// Material whose validation triggered the research.
    pub material: String,
    pub category: String,
    pub property: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: String,
    pub method: RangeMethod,
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

impl RemediationRecord {
    pub fn from_range(material: impl Into<String>, range: &CategoryRange) -> Self {
        Self {
            material: material.into(),
            category: range.category.clone(),
            property: range.property.clone(),
            min: range.min,
            max: range.max,
            unit: range.unit.clone(),
            method: range.method,
            confidence: range.confidence,
            recorded_at: range.updated_at,
        }
    }
}
