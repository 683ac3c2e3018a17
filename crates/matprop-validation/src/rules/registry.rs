//! RuleRegistry: immutable after construction, safe for unsynchronized reads.

use std::collections::BTreeMap;
use std::path::Path;

use matprop_core::errors::RuleError;

use super::loader::parse_rules;
use super::types::{CategoryRule, PropertyRule, RelationshipRule};

const BUILTIN_RULES: &str = include_str!("default_rules.toml");

#[derive(Debug, Clone)]
pub struct RuleRegistry {
    properties: BTreeMap<String, PropertyRule>,
    relationships: Vec<RelationshipRule>,
    categories: BTreeMap<String, CategoryRule>,
}

impl RuleRegistry {
    /// Build from a TOML rule document. Any malformed entry fails the whole load.
    pub fn from_toml(source: &str) -> Result<Self, RuleError> {
        let loaded = parse_rules(source)?;
        tracing::debug!(
            properties = loaded.properties.len(),
            relationships = loaded.relationships.len(),
            categories = loaded.categories.len(),
            "rule registry loaded"
        );
        Ok(Self {
            properties: loaded.properties,
            relationships: loaded.relationships,
            categories: loaded.categories,
        })
    }

    /// Load a rule document from disk.
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let source = std::fs::read_to_string(path).map_err(|e| RuleError::Parse {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }

    /// The rule set compiled into the crate.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_toml(BUILTIN_RULES)
    }

    /// Rule for a canonical property name. Aliases are not resolved here.
    pub fn property_rule(&self, canonical_name: &str) -> Option<&PropertyRule> {
        self.properties.get(canonical_name)
    }

    /// Relationship rules in document order.
    pub fn relationship_rules(&self) -> &[RelationshipRule] {
        &self.relationships
    }

    /// Rule for a category, matched on its normalized name.
    pub fn category_rule(&self, category: &str) -> Option<&CategoryRule> {
        self.categories.get(category)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}
