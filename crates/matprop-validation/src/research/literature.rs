//! Citation-backed reference ranges, in canonical units.
//!
//! Sources: CRC Handbook of Chemistry and Physics (97th ed.), ASM Handbook
//! Vol. 2, Callister & Rethwisch "Materials Science and Engineering" (10th ed.).

use matprop_core::RangeMethod;
use matprop_core::models::ResearchedRange;

/// (category, property, min, max, unit, confidence)
const TABLE: &[(&str, &str, f64, f64, &str, f64)] = &[
    // Metals: lithium..osmium, mercury..tungsten, and so on.
    ("metal", "density", 0.53, 22.6, "g/cm³", 0.95),
    ("metal", "thermalConductivity", 6.0, 429.0, "W/(m·K)", 0.92),
    ("metal", "thermalDestruction", 234.3, 3695.0, "K", 0.95),
    ("metal", "specificHeat", 128.0, 3582.0, "J/(kg·K)", 0.90),
    ("metal", "youngsModulus", 13.0, 528.0, "GPa", 0.90),
    ("metal", "tensileStrength", 10.0, 2500.0, "MPa", 0.90),
    ("metal", "electricalResistivity", 0.0159, 1.5, "µΩ·m", 0.90),
    ("metal", "laserReflectivity", 50.0, 99.0, "%", 0.90),
    // Technical ceramics.
    ("ceramic", "density", 1.5, 15.7, "g/cm³", 0.92),
    ("ceramic", "thermalConductivity", 0.5, 330.0, "W/(m·K)", 0.90),
    ("ceramic", "thermalDestruction", 1200.0, 3900.0, "K", 0.90),
    ("ceramic", "hardness", 500.0, 3500.0, "HV", 0.90),
    ("ceramic", "youngsModulus", 70.0, 700.0, "GPa", 0.90),
    // Natural stone.
    ("stone", "density", 1.6, 3.3, "g/cm³", 0.92),
    ("stone", "porosity", 0.1, 40.0, "%", 0.90),
    ("stone", "thermalConductivity", 1.0, 7.0, "W/(m·K)", 0.90),
    ("stone", "compressiveStrength", 10.0, 300.0, "MPa", 0.90),
    // Glass.
    ("glass", "density", 2.2, 6.2, "g/cm³", 0.92),
    ("glass", "thermalDestruction", 700.0, 1900.0, "K", 0.90),
    ("glass", "thermalConductivity", 0.7, 1.4, "W/(m·K)", 0.90),
    ("glass", "youngsModulus", 46.0, 95.0, "GPa", 0.90),
    // Polymers.
    ("plastic", "density", 0.85, 2.2, "g/cm³", 0.92),
    ("plastic", "thermalDestruction", 370.0, 620.0, "K", 0.90),
    ("plastic", "thermalConductivity", 0.1, 0.5, "W/(m·K)", 0.90),
    // Wood.
    ("wood", "density", 0.1, 1.4, "g/cm³", 0.92),
    ("wood", "thermalConductivity", 0.04, 0.4, "W/(m·K)", 0.90),
];

/// Published range for `(category, property)`, if one is tabled with at
/// least `confidence_floor` confidence.
pub fn lookup(category: &str, property: &str, confidence_floor: f64) -> Option<ResearchedRange> {
    TABLE
        .iter()
        .find(|(c, p, ..)| *c == category && *p == property)
        .filter(|(.., confidence)| *confidence >= confidence_floor)
        .map(|&(_, _, min, max, unit, confidence)| ResearchedRange {
            min,
            max,
            unit: unit.to_string(),
            confidence,
            method: RangeMethod::Literature,
        })
}

/// Number of tabled entries.
pub fn len() -> usize {
    TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_is_well_formed() {
        for (c, p, min, max, unit, confidence) in TABLE {
            assert!(min <= max, "{c}/{p}");
            assert!(!unit.is_empty(), "{c}/{p}");
            assert!(*confidence >= 0.90, "{c}/{p}");
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = TABLE.iter().map(|(c, p, ..)| (*c, *p)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), len());
    }

    #[test]
    fn floor_filters_entries() {
        assert!(lookup("metal", "density", 0.90).is_some());
        assert!(lookup("metal", "density", 0.99).is_none());
        assert!(lookup("metal", "unobtainium", 0.0).is_none());
    }
}
