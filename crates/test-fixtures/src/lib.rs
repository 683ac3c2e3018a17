//! Test fixtures for matprop: material builders and YAML fixture loading.
//!
//! Fixture files live in this crate's `fixtures/` directory, so every crate
//! in the workspace resolves them the same way.

use std::path::PathBuf;

use matprop_core::{Material, PropertyValue};

/// Confidence given to builder measurements unless overridden.
pub const FIXTURE_CONFIDENCE: f64 = 0.9;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Read a fixture file as text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load a YAML list of material records.
///
/// # Panics
/// Panics if the file is missing or any record fails ingestion.
pub fn load_materials(relative_path: &str) -> Vec<Material> {
    Material::list_from_yaml_str(&load_text(relative_path))
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}

/// A quantitative value at [`FIXTURE_CONFIDENCE`].
pub fn quantity(value: f64, unit: &str) -> PropertyValue {
    quantity_at(value, unit, FIXTURE_CONFIDENCE)
}

pub fn quantity_at(value: f64, unit: &str, confidence: f64) -> PropertyValue {
    PropertyValue::quantitative("fixture", value, unit, confidence, Some("fixture".to_string()))
        .unwrap_or_else(|e| panic!("bad fixture quantity {value} {unit}: {e}"))
}

/// Fluent material construction for tests.
#[derive(Debug, Clone)]
pub struct MaterialBuilder {
    material: Material,
}

impl MaterialBuilder {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            material: Material::new(name, category),
        }
    }

    pub fn quantity(mut self, property: &str, value: f64, unit: &str) -> Self {
        self.material
            .properties
            .insert(property.to_string(), quantity(value, unit));
        self
    }

    pub fn quantity_at(mut self, property: &str, value: f64, unit: &str, confidence: f64) -> Self {
        self.material
            .properties
            .insert(property.to_string(), quantity_at(value, unit, confidence));
        self
    }

    pub fn qualitative(mut self, property: &str, value: &str) -> Self {
        self.material
            .properties
            .insert(property.to_string(), PropertyValue::qualitative(value));
        self
    }

    pub fn missing(mut self, property: &str) -> Self {
        self.material
            .properties
            .insert(property.to_string(), PropertyValue::Missing);
        self
    }

    pub fn build(self) -> Material {
        self.material
    }
}

/// Aluminium with every metal-required property, all inside literature ranges.
pub fn aluminum() -> Material {
    MaterialBuilder::new("Aluminum", "metal")
        .quantity("density", 2.7, "g/cm³")
        .quantity("thermalConductivity", 237.0, "W/(m·K)")
        .quantity("meltingPoint", 933.5, "K")
        .quantity("specificHeat", 897.0, "J/(kg·K)")
        .qualitative("crystalStructure", "FCC")
        .build()
}

/// Alumina, a ceramic with the required set complete.
pub fn alumina() -> Material {
    MaterialBuilder::new("Alumina", "ceramic")
        .quantity("density", 3.95, "g/cm³")
        .quantity("hardness", 1500.0, "HV")
        .quantity("sinteringPoint", 2345.0, "K")
        .build()
}
