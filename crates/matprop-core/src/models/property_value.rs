//! The tagged property value every rule pattern-matches on.

use serde::{Deserialize, Serialize};

use crate::errors::DataIntegrityError;

/// A numeric measurement with its unit and provenance.
///
/// Construction goes through [`Measurement::new`], so every instance has a
/// finite value, a non-empty unit, and a confidence in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurement")]
pub struct Measurement {
    value: f64,
    unit: String,
    confidence: f64,
    source: Option<String>,
}

#[derive(Deserialize)]
struct RawMeasurement {
    value: f64,
    unit: String,
    confidence: f64,
    #[serde(default)]
    source: Option<String>,
}

impl TryFrom<RawMeasurement> for Measurement {
    type Error = DataIntegrityError;

    fn try_from(raw: RawMeasurement) -> Result<Self, Self::Error> {
        Self::new("<measurement>", raw.value, raw.unit, raw.confidence, raw.source)
    }
}

impl Measurement {
    /// `property` is only used to label the error.
    pub fn new(
        property: &str,
        value: f64,
        unit: impl Into<String>,
        confidence: f64,
        source: Option<String>,
    ) -> Result<Self, DataIntegrityError> {
        if !value.is_finite() {
            return Err(DataIntegrityError::NonFiniteValue {
                property: property.to_string(),
            });
        }
        let unit = unit.into().trim().to_string();
        if unit.is_empty() {
            return Err(DataIntegrityError::EmptyUnit {
                property: property.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DataIntegrityError::ConfidenceOutOfBounds {
                property: property.to_string(),
                confidence,
            });
        }
        Ok(Self {
            value,
            unit,
            confidence,
            source,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// A property value as supplied by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyValue {
    Quantitative(Measurement),
    Qualitative { value: String },
    Missing,
}

impl PropertyValue {
    /// Shorthand for a validated quantitative value.
    pub fn quantitative(
        property: &str,
        value: f64,
        unit: impl Into<String>,
        confidence: f64,
        source: Option<String>,
    ) -> Result<Self, DataIntegrityError> {
        Measurement::new(property, value, unit, confidence, source).map(Self::Quantitative)
    }

    pub fn qualitative(value: impl Into<String>) -> Self {
        Self::Qualitative {
            value: value.into(),
        }
    }

    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            Self::Quantitative(m) => Some(m),
            _ => None,
        }
    }

    /// Present means quantitative or qualitative, i.e. anything but `Missing`.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    pub fn is_qualitative(&self) -> bool {
        matches!(self, Self::Qualitative { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_rejects_nan() {
        let err = Measurement::new("density", f64::NAN, "g/cm³", 0.9, None).unwrap_err();
        assert!(matches!(err, DataIntegrityError::NonFiniteValue { .. }));
    }

    #[test]
    fn measurement_rejects_blank_unit() {
        let err = Measurement::new("density", 2.7, "  ", 0.9, None).unwrap_err();
        assert!(matches!(err, DataIntegrityError::EmptyUnit { .. }));
    }

    #[test]
    fn measurement_rejects_confidence_above_one() {
        let err = Measurement::new("density", 2.7, "g/cm³", 1.5, None).unwrap_err();
        assert!(matches!(err, DataIntegrityError::ConfidenceOutOfBounds { .. }));
    }

    #[test]
    fn measurement_trims_unit() {
        let m = Measurement::new("density", 2.7, " g/cm³ ", 0.9, None).unwrap();
        assert_eq!(m.unit(), "g/cm³");
    }

    #[test]
    fn deserialize_goes_through_validation() {
        let bad = r#"{"kind":"quantitative","value":1.0,"unit":"","confidence":0.5}"#;
        assert!(serde_json::from_str::<PropertyValue>(bad).is_err());

        let good = r#"{"kind":"quantitative","value":1.0,"unit":"K","confidence":0.5}"#;
        let v: PropertyValue = serde_json::from_str(good).unwrap();
        assert_eq!(v.as_measurement().unwrap().unit(), "K");
    }

    #[test]
    fn missing_is_not_present() {
        assert!(!PropertyValue::Missing.is_present());
        assert!(PropertyValue::qualitative("crystalline").is_present());
    }
}
