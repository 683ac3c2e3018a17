//! YAML exchange format for the range table.
//!
//! ```yaml
//! metal:
//!   density:
//!     min: 1.7
//!     max: 22.6
//!     unit: g/cm³
//!     confidence: 0.95
//!     method: literature
//! stone:
//!   crystalStructure:
//!     qualitative: true
//! ```

use std::collections::BTreeMap;

use matprop_core::errors::{DataIntegrityError, MatpropResult, StorageError};
use matprop_core::models::normalize_category;
use matprop_core::{CategoryRange, IRangeStore, RangeMethod};
use serde::{Deserialize, Serialize};

/// One range entry, keyed by category then property in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_method")]
    pub method: RangeMethod,
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_generated: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub qualitative: bool,
}

fn default_confidence() -> f64 {
    1.0
}

fn default_method() -> RangeMethod {
    RangeMethod::Literature
}

fn is_false(b: &bool) -> bool {
    !*b
}

pub type RangeDocument = BTreeMap<String, BTreeMap<String, RangeEntry>>;

impl From<&CategoryRange> for RangeEntry {
    fn from(r: &CategoryRange) -> Self {
        Self {
            min: r.min,
            max: r.max,
            unit: r.unit.clone(),
            confidence: r.confidence,
            method: r.method,
            auto_generated: r.auto_generated,
            qualitative: r.qualitative,
        }
    }
}

/// Render every stored range, grouped by category.
pub fn export_ranges(store: &dyn IRangeStore) -> MatpropResult<String> {
    let mut doc = RangeDocument::new();
    for range in store.all_ranges()? {
        doc.entry(range.category.clone())
            .or_default()
            .insert(range.property.clone(), RangeEntry::from(&range));
    }
    let yaml = serde_yaml::to_string(&doc).map_err(|e| StorageError::Serialization {
        message: e.to_string(),
    })?;
    tracing::info!(categories = doc.len(), "exported range table");
    Ok(yaml)
}

/// Parse a range document into validated ranges without touching a store.
pub fn parse_ranges(yaml: &str) -> MatpropResult<Vec<CategoryRange>> {
    let doc: RangeDocument = serde_yaml::from_str(yaml).map_err(|e| StorageError::Serialization {
        message: e.to_string(),
    })?;

    let mut ranges = Vec::new();
    for (category, properties) in doc {
        let category = normalize_category(&category);
        for (property, entry) in properties {
            let range = if entry.qualitative {
                if entry.min.is_some() || entry.max.is_some() || entry.auto_generated {
                    return Err(DataIntegrityError::QualitativeBounds { property }.into());
                }
                CategoryRange::qualitative(category.clone(), property)
            } else {
                CategoryRange::quantitative(
                    category.clone(),
                    property,
                    entry.min,
                    entry.max,
                    entry.unit,
                    entry.confidence,
                    entry.method,
                    entry.auto_generated,
                )?
            };
            range.check()?;
            ranges.push(range);
        }
    }
    Ok(ranges)
}

/// Load a curated range document, overwriting existing entries.
/// Returns the number of ranges written.
pub fn import_ranges(store: &dyn IRangeStore, yaml: &str) -> MatpropResult<usize> {
    let ranges = parse_ranges(yaml)?;
    for range in &ranges {
        store.upsert(range)?;
    }
    tracing::info!(count = ranges.len(), "imported range table");
    Ok(ranges.len())
}
