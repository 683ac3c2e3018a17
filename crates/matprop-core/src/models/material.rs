//! Material records and the ingestion boundary that turns loosely-typed
//! YAML/JSON property maps into [`PropertyValue`]s.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::property_value::PropertyValue;
use crate::constants::{DEFAULT_MEASUREMENT_CONFIDENCE, PERCENT_CONFIDENCE_CEILING};
use crate::errors::DataIntegrityError;

/// A material as handed to the engine. The engine only ever reads it.
///
/// Property keys may be canonical names or aliases; alias resolution happens
/// inside the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Category names are matched case-insensitively and without surrounding
/// whitespace; this is the stored form.
pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Material {
    /// New material with no properties. The category is normalized.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: normalize_category(&category.into()),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property insertion.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Raw lookup by the name the record used; no alias resolution.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Parse a single material record from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DataIntegrityError> {
        let record: MaterialRecord =
            serde_yaml::from_str(yaml).map_err(|e| DataIntegrityError::MalformedRecord {
                message: e.to_string(),
            })?;
        Self::from_record(record)
    }

    /// Parse a list of material records from YAML.
    pub fn list_from_yaml_str(yaml: &str) -> Result<Vec<Self>, DataIntegrityError> {
        let records: Vec<MaterialRecord> =
            serde_yaml::from_str(yaml).map_err(|e| DataIntegrityError::MalformedRecord {
                message: e.to_string(),
            })?;
        records.into_iter().map(Self::from_record).collect()
    }

    /// Convert a raw record into a typed material.
    pub fn from_record(record: MaterialRecord) -> Result<Self, DataIntegrityError> {
        if record.name.trim().is_empty() {
            return Err(DataIntegrityError::MalformedRecord {
                message: "material name is empty".to_string(),
            });
        }
        if record.category.trim().is_empty() {
            return Err(DataIntegrityError::MalformedRecord {
                message: format!("material '{}' has no category", record.name),
            });
        }

        let mut properties = BTreeMap::new();
        for (name, raw) in record.properties {
            let value = match raw {
                Some(r) => r.into_value(&name)?,
                None => PropertyValue::Missing,
            };
            properties.insert(name, value);
        }

        Ok(Self {
            name: record.name,
            category: normalize_category(&record.category),
            properties,
        })
    }
}

/// Raw material record as produced by the external data-loading layer.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Option<PropertyRecord>>,
}

/// Raw property entry: `{value, unit, confidence, source}`, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyRecord {
    #[serde(default)]
    pub value: Option<RawScalar>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Whatever scalar the loader found in the `value` slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl PropertyRecord {
    fn into_value(self, property: &str) -> Result<PropertyValue, DataIntegrityError> {
        let number = match self.value {
            None => return Ok(PropertyValue::Missing),
            Some(RawScalar::Number(n)) => n,
            Some(RawScalar::Flag(b)) => return Ok(PropertyValue::qualitative(b.to_string())),
            Some(RawScalar::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(PropertyValue::Missing);
                }
                // Numeric strings only count as numbers when a unit came with them.
                match (trimmed.parse::<f64>(), self.unit.as_deref()) {
                    (Ok(n), Some(u)) if !u.trim().is_empty() => n,
                    _ => return Ok(PropertyValue::qualitative(trimmed)),
                }
            }
        };

        let unit = self.unit.unwrap_or_default();
        let confidence = normalize_confidence(property, self.confidence)?;
        PropertyValue::quantitative(property, number, unit, confidence, self.source)
    }
}

/// Accept fractions or percentages; reject anything else.
fn normalize_confidence(property: &str, raw: Option<f64>) -> Result<f64, DataIntegrityError> {
    let Some(c) = raw else {
        return Ok(DEFAULT_MEASUREMENT_CONFIDENCE);
    };
    if c.is_finite() && c > 1.0 && c <= PERCENT_CONFIDENCE_CEILING {
        return Ok(c / 100.0);
    }
    if c.is_finite() && (0.0..=1.0).contains(&c) {
        return Ok(c);
    }
    Err(DataIntegrityError::ConfidenceOutOfBounds {
        property: property.to_string(),
        confidence: c,
    })
}
