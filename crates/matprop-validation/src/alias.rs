//! Property name canonicalization.
//!
//! Several naming schemes coexist in material records (`meltingPoint`,
//! `sinteringPoint`, `thermal_conductivity`, ...). Everything downstream of
//! the resolver works on canonical names only.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Why a `thermalDestruction` value was recorded. Range validation ignores
/// this; it only matters to callers that report or compare mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantTag {
    Melting,
    Sintering,
    Degradation,
    Softening,
}

/// (alias, canonical, variant)
const SYNONYMS: &[(&str, &str, Option<VariantTag>)] = &[
    // Thermal destruction: one canonical quantity, four mechanisms.
    ("meltingPoint", "thermalDestruction", Some(VariantTag::Melting)),
    ("melting_point", "thermalDestruction", Some(VariantTag::Melting)),
    ("sinteringPoint", "thermalDestruction", Some(VariantTag::Sintering)),
    ("sintering_point", "thermalDestruction", Some(VariantTag::Sintering)),
    ("degradationPoint", "thermalDestruction", Some(VariantTag::Degradation)),
    ("decompositionPoint", "thermalDestruction", Some(VariantTag::Degradation)),
    ("degradation_point", "thermalDestruction", Some(VariantTag::Degradation)),
    ("softeningPoint", "thermalDestruction", Some(VariantTag::Softening)),
    ("softening_point", "thermalDestruction", Some(VariantTag::Softening)),
    ("thermalDestructionPoint", "thermalDestruction", None),
    ("thermal_destruction", "thermalDestruction", None),
    // Laser interaction.
    ("absorption", "laserAbsorption", None),
    ("absorptivity", "laserAbsorption", None),
    ("absorptionCoefficient", "laserAbsorption", None),
    ("laser_absorption", "laserAbsorption", None),
    ("reflectivity", "laserReflectivity", None),
    ("reflectance", "laserReflectivity", None),
    ("laser_reflectivity", "laserReflectivity", None),
    // Thermal.
    ("thermal_conductivity", "thermalConductivity", None),
    ("specificHeatCapacity", "specificHeat", None),
    ("heatCapacity", "specificHeat", None),
    ("specific_heat", "specificHeat", None),
    ("thermal_diffusivity", "thermalDiffusivity", None),
    ("thermalExpansionCoefficient", "thermalExpansion", None),
    ("coefficientOfThermalExpansion", "thermalExpansion", None),
    ("thermal_expansion", "thermalExpansion", None),
    // Mechanical.
    ("elasticModulus", "youngsModulus", None),
    ("modulusOfElasticity", "youngsModulus", None),
    ("youngs_modulus", "youngsModulus", None),
    ("ultimateTensileStrength", "tensileStrength", None),
    ("tensile_strength", "tensileStrength", None),
    ("compressive_strength", "compressiveStrength", None),
    ("vickersHardness", "hardness", None),
    // Electrical.
    ("resistivity", "electricalResistivity", None),
    ("electrical_resistivity", "electricalResistivity", None),
    ("electrical_conductivity", "electricalConductivity", None),
    // Structure.
    ("crystal_structure", "crystalStructure", None),
];

/// Pure, total mapping from raw property names to canonical names.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    table: HashMap<&'static str, (&'static str, Option<VariantTag>)>,
}

impl AliasResolver {
    pub fn new() -> Self {
        let table = SYNONYMS
            .iter()
            .map(|(alias, canonical, variant)| (*alias, (*canonical, *variant)))
            .collect();
        Self { table }
    }

    /// Canonical name for `name`. Unknown names pass through unchanged.
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        match self.table.get(name) {
            Some((canonical, _)) => *canonical,
            None => name,
        }
    }

    /// The mechanism an alias implies, if any.
    pub fn variant_of(&self, name: &str) -> Option<VariantTag> {
        self.table.get(name).and_then(|(_, variant)| *variant)
    }
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermal_destruction_synonyms_collapse() {
        let r = AliasResolver::new();
        for raw in ["meltingPoint", "sinteringPoint", "degradationPoint", "softeningPoint"] {
            assert_eq!(r.resolve(raw), "thermalDestruction");
        }
    }

    #[test]
    fn unknown_names_pass_through() {
        let r = AliasResolver::new();
        assert_eq!(r.resolve("glitterFactor"), "glitterFactor");
        assert_eq!(r.resolve("density"), "density");
    }

    #[test]
    fn variant_tags() {
        let r = AliasResolver::new();
        assert_eq!(r.variant_of("sinteringPoint"), Some(VariantTag::Sintering));
        assert_eq!(r.variant_of("softeningPoint"), Some(VariantTag::Softening));
        assert_eq!(r.variant_of("thermalDestruction"), None);
        assert_eq!(r.variant_of("absorption"), None);
    }

    #[test]
    fn canonical_names_are_fixed_points() {
        let r = AliasResolver::new();
        for (_, canonical, _) in SYNONYMS {
            assert_eq!(r.resolve(canonical), *canonical);
        }
    }
}
