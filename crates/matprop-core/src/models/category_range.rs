use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::material::normalize_category;
use crate::errors::DataIntegrityError;

/// How a range was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMethod {
    /// Citation-backed table entry (also used for curated imports).
    Literature,
    /// Percentile range over the category's observed population.
    Statistical,
    /// Spread around a single observed value.
    Heuristic,
}

impl RangeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literature => "literature",
            Self::Statistical => "statistical",
            Self::Heuristic => "heuristic",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "literature" => Some(Self::Literature),
            "statistical" => Some(Self::Statistical),
            "heuristic" => Some(Self::Heuristic),
            _ => None,
        }
    }
}

impl fmt::Display for RangeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store key: one range per (category, canonical property).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RangeKey {
    pub category: String,
    pub property: String,
}

impl RangeKey {
    /// Key for `(category, property)`. The category is normalized.
    pub fn new(category: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            category: normalize_category(&category.into()),
            property: property.into(),
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.property)
    }
}

/// Persisted min/max bound for a (category, property) pair.
///
/// Invariants, enforced by the constructors:
/// - `min <= max` when both are present;
/// - qualitative entries never carry bounds and are never auto-generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRange {
    pub category: String,
    pub property: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: String,
    pub confidence: f64,
    pub method: RangeMethod,
    pub auto_generated: bool,
    pub qualitative: bool,
    pub updated_at: DateTime<Utc>,
}

impl CategoryRange {
    /// Build a numeric range, checking bounds and confidence.
    #[allow(clippy::too_many_arguments)]
    pub fn quantitative(
        category: impl Into<String>,
        property: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
        unit: impl Into<String>,
        confidence: f64,
        method: RangeMethod,
        auto_generated: bool,
    ) -> Result<Self, DataIntegrityError> {
        let range = Self {
            category: category.into(),
            property: property.into(),
            min,
            max,
            unit: unit.into(),
            confidence,
            method,
            auto_generated,
            qualitative: false,
            updated_at: Utc::now(),
        };
        range.check()?;
        Ok(range)
    }

    /// A qualitative marker entry: no bounds, never auto-generated.
    pub fn qualitative(category: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            property: property.into(),
            min: None,
            max: None,
            unit: String::new(),
            confidence: 1.0,
            method: RangeMethod::Literature,
            auto_generated: false,
            qualitative: true,
            updated_at: Utc::now(),
        }
    }

    /// Re-check the invariants (used on deserialized or imported entries).
    pub fn check(&self) -> Result<(), DataIntegrityError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(DataIntegrityError::NonFiniteValue {
                    property: self.property.clone(),
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(DataIntegrityError::InvertedRange {
                    property: self.property.clone(),
                    min,
                    max,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(DataIntegrityError::ConfidenceOutOfBounds {
                property: self.property.clone(),
                confidence: self.confidence,
            });
        }
        if self.qualitative && (self.min.is_some() || self.max.is_some() || self.auto_generated) {
            return Err(DataIntegrityError::QualitativeBounds {
                property: self.property.clone(),
            });
        }
        Ok(())
    }

    /// Store key for this entry.
    pub fn key(&self) -> RangeKey {
        RangeKey::new(&self.category, &self.property)
    }

    /// Pin the timestamp (tests and imports).
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    /// Inclusive containment; absent bounds are open.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalizes_category() {
        assert_eq!(RangeKey::new("Ceramic", "density").to_string(), "ceramic/density");
    }

    #[test]
    fn inverted_range_rejected() {
        let err = CategoryRange::quantitative(
            "metal",
            "density",
            Some(5.0),
            Some(1.0),
            "g/cm³",
            0.9,
            RangeMethod::Literature,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, DataIntegrityError::InvertedRange { .. }));
    }

    #[test]
    fn open_bounds_contain_everything_on_that_side() {
        let r = CategoryRange::quantitative(
            "metal",
            "density",
            Some(1.0),
            None,
            "g/cm³",
            0.9,
            RangeMethod::Literature,
            false,
        )
        .unwrap();
        assert!(r.contains(1e9));
        assert!(!r.contains(0.5));
    }

    #[test]
    fn qualitative_entry_passes_check() {
        let r = CategoryRange::qualitative("stone", "crystalStructure");
        assert!(r.check().is_ok());
        assert!(!r.auto_generated);
    }

    #[test]
    fn auto_generated_qualitative_fails_check() {
        let mut r = CategoryRange::qualitative("stone", "crystalStructure");
        r.auto_generated = true;
        assert!(r.check().is_err());
    }

    #[test]
    fn method_round_trips_through_str() {
        for m in [RangeMethod::Literature, RangeMethod::Statistical, RangeMethod::Heuristic] {
            assert_eq!(RangeMethod::parse_str(m.as_str()), Some(m));
        }
        assert_eq!(RangeMethod::parse_str("guess"), None);
    }
}
