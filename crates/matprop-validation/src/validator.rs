//! Validator: three ordered passes over one material.
//!
//! Deterministic: the same material against the same store contents yields
//! the same issue list, in the same order.

use std::collections::BTreeSet;
use std::sync::Arc;

use matprop_core::config::ValidationConfig;
use matprop_core::errors::MatpropResult;
use matprop_core::{IRangeStore, IssueKind, Material, ValidationIssue};

use crate::alias::AliasResolver;
use crate::passes::{self, ResolvedMaterial};
use crate::rules::RuleRegistry;

/// Issues split by the pass that produced them. Concatenation order is
/// property, relationship, category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub property: Vec<ValidationIssue>,
    pub relationship: Vec<ValidationIssue>,
    pub category: Vec<ValidationIssue>,
}

impl PassReport {
    /// Issues in pass order: property, relationship, category.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.property
            .iter()
            .chain(self.relationship.iter())
            .chain(self.category.iter())
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        let mut out = self.property;
        out.extend(self.relationship);
        out.extend(self.category);
        out
    }

    /// Canonical properties flagged `needs_research`, sorted.
    pub fn needs_research(&self) -> BTreeSet<String> {
        self.property
            .iter()
            .filter(|i| i.kind == IssueKind::NeedsResearch)
            .map(|i| i.property.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<RuleRegistry>,
    aliases: AliasResolver,
    config: ValidationConfig,
}

impl Validator {
    /// Validator over a shared rule registry.
    pub fn new(rules: Arc<RuleRegistry>, config: ValidationConfig) -> Self {
        Self {
            rules,
            aliases: AliasResolver::new(),
            config,
        }
    }

    /// Built-in rules, default thresholds.
    pub fn with_builtin_rules() -> MatpropResult<Self> {
        Ok(Self::new(
            Arc::new(RuleRegistry::builtin()?),
            ValidationConfig::default(),
        ))
    }

    /// The rule registry this validator checks against.
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    /// Tolerances and thresholds in effect.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Alias-resolved view of `material`.
    pub fn resolve<'a>(&self, material: &'a Material) -> ResolvedMaterial<'a> {
        ResolvedMaterial::resolve(material, &self.aliases)
    }

    /// All three passes, concatenated.
    pub fn validate(
        &self,
        material: &Material,
        store: &dyn IRangeStore,
    ) -> MatpropResult<Vec<ValidationIssue>> {
        Ok(self.run(material, store)?.into_issues())
    }

    /// All three passes, kept apart.
    pub fn run(&self, material: &Material, store: &dyn IRangeStore) -> MatpropResult<PassReport> {
        let resolved = self.resolve(material);
        let property = passes::property::run(&resolved, &self.rules, store, &self.config, None)?;
        let relationship = passes::relationship::run(&resolved, &self.rules, None);
        let category = passes::category::run(&resolved, &self.rules);
        tracing::debug!(
            material = %material.name,
            property = property.len(),
            relationship = relationship.len(),
            category = category.len(),
            "validated"
        );
        Ok(PassReport {
            property,
            relationship,
            category,
        })
    }

    /// Property and relationship passes restricted to `properties` and the
    /// relationships that read any of them. The category pass is not re-run.
    pub fn revalidate(
        &self,
        material: &Material,
        store: &dyn IRangeStore,
        properties: &BTreeSet<String>,
    ) -> MatpropResult<PassReport> {
        let resolved = self.resolve(material);
        let property =
            passes::property::run(&resolved, &self.rules, store, &self.config, Some(properties))?;
        let relationship = passes::relationship::run(&resolved, &self.rules, Some(properties));
        Ok(PassReport {
            property,
            relationship,
            category: Vec::new(),
        })
    }
}
