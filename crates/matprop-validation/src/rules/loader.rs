//! TOML rule document parsing and structural checks.
//!
//! Every check here is fatal: a registry either loads completely or not at all.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use matprop_core::errors::RuleError;
use matprop_core::models::normalize_category;
use serde::Deserialize;

use super::types::{CategoryRule, PropertyRule, RelationshipKind, RelationshipRule};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    #[serde(default)]
    property: Vec<PropertyDef>,
    #[serde(default)]
    relationship: Vec<RelationshipDef>,
    #[serde(default)]
    category: Vec<CategoryDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyDef {
    name: Option<String>,
    canonical_unit: Option<String>,
    #[serde(default)]
    units: BTreeMap<String, f64>,
    global_min: Option<f64>,
    global_max: Option<f64>,
    #[serde(default)]
    qualitative: bool,
    #[serde(default)]
    expected_ratio_range: BTreeMap<String, [f64; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RelationshipDef {
    id: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    properties: Vec<String>,
    hard_tolerance: Option<f64>,
    soft_tolerance: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryDef {
    name: Option<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    forbidden: Vec<String>,
}

/// Parsed and checked rule sets, ready for the registry.
pub(crate) struct LoadedRules {
    pub properties: BTreeMap<String, PropertyRule>,
    pub relationships: Vec<RelationshipRule>,
    pub categories: BTreeMap<String, CategoryRule>,
}

pub(crate) fn parse_rules(source: &str) -> Result<LoadedRules, RuleError> {
    let doc: RuleDocument = toml::from_str(source).map_err(|e| RuleError::Parse {
        message: e.to_string(),
    })?;

    let mut properties = BTreeMap::new();
    for (idx, def) in doc.property.into_iter().enumerate() {
        let rule = build_property(idx, def)?;
        if properties.contains_key(&rule.name) {
            return Err(RuleError::DuplicateRule { id: rule.name });
        }
        properties.insert(rule.name.clone(), rule);
    }

    let mut relationships = Vec::new();
    let mut seen_ids = HashSet::new();
    for (idx, def) in doc.relationship.into_iter().enumerate() {
        let rule = build_relationship(idx, def, &properties)?;
        if !seen_ids.insert(rule.id.clone()) {
            return Err(RuleError::DuplicateRule { id: rule.id });
        }
        relationships.push(rule);
    }

    let mut categories = BTreeMap::new();
    for (idx, def) in doc.category.into_iter().enumerate() {
        let rule = build_category(idx, def, &properties)?;
        if categories.contains_key(&rule.name) {
            return Err(RuleError::DuplicateRule { id: rule.name });
        }
        categories.insert(rule.name.clone(), rule);
    }

    Ok(LoadedRules {
        properties,
        relationships,
        categories,
    })
}

fn required<T>(value: Option<T>, rule: &str, field: &str) -> Result<T, RuleError> {
    value.ok_or_else(|| RuleError::MissingField {
        rule: rule.to_string(),
        field: field.to_string(),
    })
}

fn build_property(idx: usize, def: PropertyDef) -> Result<PropertyRule, RuleError> {
    let name = required(def.name, &format!("property[{idx}]"), "name")?;

    let (canonical_unit, units) = if def.qualitative {
        (def.canonical_unit.unwrap_or_default(), def.units)
    } else {
        if def.units.is_empty() {
            return Err(RuleError::NoAllowedUnits { property: name });
        }
        let canonical = required(def.canonical_unit, &name, "canonical_unit")?;
        if def.units.get(&canonical) != Some(&1.0) {
            return Err(RuleError::InvalidUnits {
                property: name,
                message: format!("canonical unit '{canonical}' must map to factor 1.0"),
            });
        }
        (canonical, def.units)
    };

    for (unit, factor) in &units {
        if unit.trim().is_empty() || unit.trim() != unit {
            return Err(RuleError::InvalidUnits {
                property: name,
                message: format!("unit key '{unit}' is blank or padded"),
            });
        }
        if !factor.is_finite() || *factor <= 0.0 {
            return Err(RuleError::InvalidUnits {
                property: name,
                message: format!("factor for '{unit}' must be positive, got {factor}"),
            });
        }
    }

    if let (Some(min), Some(max)) = (def.global_min, def.global_max) {
        if min > max {
            return Err(RuleError::InvalidBounds {
                rule: name,
                message: format!("global_min {min} exceeds global_max {max}"),
            });
        }
    }

    let mut expected_ratio_range = BTreeMap::new();
    for (category, [lo, hi]) in def.expected_ratio_range {
        if !(lo.is_finite() && hi.is_finite()) || lo <= 0.0 || lo > hi {
            return Err(RuleError::InvalidBounds {
                rule: name,
                message: format!("expected_ratio_range for '{category}' is [{lo}, {hi}]"),
            });
        }
        expected_ratio_range.insert(normalize_category(&category), (lo, hi));
    }

    Ok(PropertyRule {
        name,
        canonical_unit,
        units,
        global_min: def.global_min,
        global_max: def.global_max,
        qualitative: def.qualitative,
        expected_ratio_range,
    })
}

fn build_relationship(
    idx: usize,
    def: RelationshipDef,
    properties: &BTreeMap<String, PropertyRule>,
) -> Result<RelationshipRule, RuleError> {
    let id = required(def.id, &format!("relationship[{idx}]"), "id")?;
    let kind_str = required(def.kind, &id, "kind")?;
    let kind = RelationshipKind::parse_str(&kind_str).ok_or_else(|| {
        RuleError::UnknownRelationship {
            id: id.clone(),
            kind: kind_str.clone(),
        }
    })?;
    let hard_tolerance = required(def.hard_tolerance, &id, "hard_tolerance")?;

    if def.properties.len() != kind.arity() {
        return Err(RuleError::WrongArity {
            id,
            expected: kind.arity(),
            found: def.properties.len(),
        });
    }
    for property in &def.properties {
        match properties.get(property) {
            None => {
                return Err(RuleError::UndefinedProperty {
                    rule: id,
                    property: property.clone(),
                })
            }
            Some(rule) if rule.qualitative => {
                return Err(RuleError::InvalidBounds {
                    rule: id,
                    message: format!("'{property}' is qualitative"),
                })
            }
            Some(_) => {}
        }
    }

    if !hard_tolerance.is_finite() || hard_tolerance < 0.0 {
        return Err(RuleError::InvalidBounds {
            rule: id,
            message: format!("hard_tolerance must be non-negative, got {hard_tolerance}"),
        });
    }
    if let Some(soft) = def.soft_tolerance {
        if !soft.is_finite() || soft < 0.0 || soft > hard_tolerance {
            return Err(RuleError::InvalidBounds {
                rule: id,
                message: format!("soft_tolerance {soft} must lie in [0, {hard_tolerance}]"),
            });
        }
    }

    Ok(RelationshipRule {
        id,
        kind,
        properties: def.properties,
        hard_tolerance,
        soft_tolerance: def.soft_tolerance,
    })
}

fn build_category(
    idx: usize,
    def: CategoryDef,
    properties: &BTreeMap<String, PropertyRule>,
) -> Result<CategoryRule, RuleError> {
    let name = normalize_category(&required(def.name, &format!("category[{idx}]"), "name")?);

    let required_set: BTreeSet<String> = def.required.into_iter().collect();
    let forbidden_set: BTreeSet<String> = def.forbidden.into_iter().collect();

    for property in required_set.iter().chain(forbidden_set.iter()) {
        if !properties.contains_key(property) {
            return Err(RuleError::UndefinedProperty {
                rule: name,
                property: property.clone(),
            });
        }
    }
    if let Some(both) = required_set.intersection(&forbidden_set).next() {
        return Err(RuleError::InvalidBounds {
            rule: name,
            message: format!("'{both}' is both required and forbidden"),
        });
    }

    Ok(CategoryRule {
        name,
        required: required_set,
        forbidden: forbidden_set,
    })
}
