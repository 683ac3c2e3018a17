//! Rule types. All immutable after registry construction.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Per-property unit table, global physical bounds, and ratio expectations.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    pub name: String,
    pub canonical_unit: String,
    /// Unit string to multiplication factor into `canonical_unit`.
    pub units: BTreeMap<String, f64>,
    /// Physical bounds in the canonical unit. Violations are data-integrity errors.
    pub global_min: Option<f64>,
    pub global_max: Option<f64>,
    pub qualitative: bool,
    /// Category to expected (low, high) ratio, read by ratio relationships.
    pub expected_ratio_range: BTreeMap<String, (f64, f64)>,
}

impl PropertyRule {
    /// Multiplier from `unit` to the canonical unit. The unit is trimmed first.
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.units.get(unit.trim()).copied()
    }

    /// Convert `value` expressed in `unit` to the canonical unit.
    pub fn to_canonical(&self, value: f64, unit: &str) -> Option<f64> {
        self.factor(unit).map(|f| value * f)
    }

    /// Canonical value within the global physical bounds (inclusive).
    pub fn within_global(&self, canonical_value: f64) -> bool {
        self.global_min.map_or(true, |min| canonical_value >= min)
            && self.global_max.map_or(true, |max| canonical_value <= max)
    }

    /// Expected ratio bounds for a category, if configured.
    pub fn ratio_range(&self, category: &str) -> Option<(f64, f64)> {
        self.expected_ratio_range.get(category).copied()
    }
}

/// The relationship formulas the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Sum of absorbed and reflected fractions, in percent.
    EnergyConservation,
    /// Relative error of measured diffusivity against k / (ρ·cp).
    Diffusivity,
    /// Relative distance of E/σ outside the category's expected ratio range.
    ModulusStrengthRatio,
    /// |σ·ρ − 1| for electrical conductivity and resistivity.
    ConductivityResistivity,
}

impl RelationshipKind {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "energy_conservation" => Some(Self::EnergyConservation),
            "diffusivity" => Some(Self::Diffusivity),
            "modulus_strength_ratio" => Some(Self::ModulusStrengthRatio),
            "conductivity_resistivity" => Some(Self::ConductivityResistivity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnergyConservation => "energy_conservation",
            Self::Diffusivity => "diffusivity",
            Self::ModulusStrengthRatio => "modulus_strength_ratio",
            Self::ConductivityResistivity => "conductivity_resistivity",
        }
    }

    /// Number of input properties the formula reads.
    pub fn arity(&self) -> usize {
        match self {
            Self::Diffusivity => 4,
            _ => 2,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cross-property consistency check.
///
/// `evaluate` yields a non-negative measure; above `hard_tolerance` is an
/// error, above `soft_tolerance` a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRule {
    pub id: String,
    pub kind: RelationshipKind,
    /// Canonical input properties, in formula order.
    pub properties: Vec<String>,
    pub hard_tolerance: f64,
    pub soft_tolerance: Option<f64>,
}

impl RelationshipRule {
    /// True when any input of this rule is in `properties`.
    pub fn touches(&self, properties: &BTreeSet<String>) -> bool {
        self.properties.iter().any(|p| properties.contains(p))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryRule {
    pub name: String,
    pub required: BTreeSet<String>,
    pub forbidden: BTreeSet<String>,
}
