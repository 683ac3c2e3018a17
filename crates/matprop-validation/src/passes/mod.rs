//! The three validator passes and the alias-resolved material view they share.

pub mod category;
pub mod property;
pub mod relationship;

use std::collections::BTreeMap;

use matprop_core::models::normalize_category;
use matprop_core::{Material, PropertyValue};

use crate::alias::AliasResolver;

/// One property after alias resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedProperty<'a> {
    /// The name the record actually used.
    pub raw_name: &'a str,
    pub value: &'a PropertyValue,
}

/// A raw name dropped because another raw name for the same canonical name won.
#[derive(Debug, Clone)]
pub struct DuplicateAlias<'a> {
    pub canonical: &'a str,
    pub dropped: &'a str,
    pub kept: &'a str,
}

/// Read-only view of a material keyed by canonical property name.
///
/// When two raw names resolve to one canonical name, a measured value beats
/// a qualitative one, which beats a missing one; ties go to the first raw
/// name in sorted order. The losers are recorded as duplicates.
#[derive(Debug, Clone)]
pub struct ResolvedMaterial<'a> {
    pub material: &'a Material,
    pub properties: BTreeMap<&'a str, ResolvedProperty<'a>>,
    pub duplicates: Vec<DuplicateAlias<'a>>,
    category: String,
}

impl<'a> ResolvedMaterial<'a> {
    /// Resolve every raw property name of `material` through `aliases`.
    pub fn resolve(material: &'a Material, aliases: &AliasResolver) -> Self {
        // BTreeMap iteration is sorted by raw name, so each group is too.
        let mut groups: BTreeMap<&'a str, Vec<ResolvedProperty<'a>>> = BTreeMap::new();
        for (raw_name, value) in &material.properties {
            groups
                .entry(aliases.resolve(raw_name.as_str()))
                .or_default()
                .push(ResolvedProperty {
                    raw_name: raw_name.as_str(),
                    value,
                });
        }

        let mut properties = BTreeMap::new();
        let mut duplicates = Vec::new();
        for (canonical, candidates) in groups {
            let Some(kept) = candidates
                .iter()
                .copied()
                .min_by_key(|c| (variant_rank(c.value), c.raw_name))
            else {
                continue;
            };
            duplicates.extend(
                candidates
                    .iter()
                    .filter(|c| c.raw_name != kept.raw_name)
                    .map(|c| DuplicateAlias {
                        canonical,
                        dropped: c.raw_name,
                        kept: kept.raw_name,
                    }),
            );
            properties.insert(canonical, kept);
        }

        Self {
            material,
            properties,
            duplicates,
            category: normalize_category(&material.category),
        }
    }

    pub fn name(&self) -> &'a str {
        &self.material.name
    }

    /// The material's category in normalized form.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Winning value for a canonical property name.
    pub fn get(&self, canonical: &str) -> Option<&'a PropertyValue> {
        self.properties.get(canonical).map(|p| p.value)
    }

    /// Present means `Quantitative` or `Qualitative`.
    pub fn is_present(&self, canonical: &str) -> bool {
        self.get(canonical).is_some_and(PropertyValue::is_present)
    }
}

fn variant_rank(value: &PropertyValue) -> u8 {
    match value {
        PropertyValue::Quantitative(_) => 0,
        PropertyValue::Qualitative { .. } => 1,
        PropertyValue::Missing => 2,
    }
}
