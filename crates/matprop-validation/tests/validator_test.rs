//! Validator behavior against the built-in rules and an in-memory range store.

use matprop_core::{
    CategoryRange, IssueKind, RangeMethod, Severity, ValidationIssue, ValidationPass,
};
use matprop_storage::MemoryRangeStore;
use matprop_validation::Validator;
use proptest::prelude::*;
use test_fixtures::{alumina, aluminum, MaterialBuilder};

fn range(category: &str, property: &str, min: f64, max: f64, unit: &str) -> CategoryRange {
    CategoryRange::quantitative(
        category,
        property,
        Some(min),
        Some(max),
        unit,
        0.95,
        RangeMethod::Literature,
        false,
    )
    .unwrap()
}

fn metal_store() -> MemoryRangeStore {
    MemoryRangeStore::with_ranges([
        range("metal", "density", 0.53, 22.6, "g/cm³"),
        range("metal", "thermalConductivity", 6.0, 429.0, "W/(m·K)"),
        range("metal", "thermalDestruction", 234.3, 3695.0, "K"),
        range("metal", "specificHeat", 128.0, 3582.0, "J/(kg·K)"),
        range("metal", "laserAbsorption", 0.0, 100.0, "%"),
        range("metal", "laserReflectivity", 0.0, 100.0, "%"),
    ])
    .unwrap()
}

fn ceramic_store() -> MemoryRangeStore {
    MemoryRangeStore::with_ranges([
        range("ceramic", "density", 1.5, 15.7, "g/cm³"),
        range("ceramic", "hardness", 500.0, 3500.0, "HV"),
        range("ceramic", "thermalDestruction", 1200.0, 3900.0, "K"),
    ])
    .unwrap()
}

fn validator() -> Validator {
    Validator::with_builtin_rules().unwrap()
}

fn of_kind<'a>(issues: &'a [ValidationIssue], kind: IssueKind) -> Vec<&'a ValidationIssue> {
    issues.iter().filter(|i| i.kind == kind).collect()
}

#[test]
fn complete_material_in_range_is_clean() {
    let issues = validator().validate(&aluminum(), &metal_store()).unwrap();
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn validation_is_idempotent() {
    let v = validator();
    let store = MemoryRangeStore::new();
    let material = MaterialBuilder::new("Oddity", "metal")
        .quantity("density", 2.7, "lb/ft³")
        .quantity("meltingPoint", 900.0, "K")
        .quantity_at("hardness", 100.0, "HV", 0.3)
        .quantity("laserAbsorption", 80.0, "%")
        .quantity("laserReflectivity", 55.0, "%")
        .build();

    let first = v.validate(&material, &store).unwrap();
    let second = v.validate(&material, &store).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn issues_come_in_pass_order() {
    let material = MaterialBuilder::new("Mixed", "ceramic")
        .quantity("density", 2.0, "furlongs")
        .quantity("laserAbsorption", 90.0, "%")
        .quantity("laserReflectivity", 60.0, "%")
        .build();
    let issues = validator().validate(&material, &ceramic_store()).unwrap();
    let passes: Vec<ValidationPass> = issues.iter().map(|i| i.pass).collect();
    let mut sorted = passes.clone();
    sorted.sort();
    assert_eq!(passes, sorted);
    assert!(passes.contains(&ValidationPass::Property));
    assert!(passes.contains(&ValidationPass::Relationship));
    assert!(passes.contains(&ValidationPass::Category));
}

#[test]
fn energy_within_tolerance_raises_nothing() {
    let material = MaterialBuilder::new("Polished", "metal")
        .quantity("laserAbsorption", 70.0, "%")
        .quantity("laserReflectivity", 55.0, "%")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    assert!(issues.iter().all(|i| i.rule.is_none()), "{issues:#?}");
}

#[test]
fn energy_above_tolerance_is_one_error() {
    let material = MaterialBuilder::new("Impossible", "metal")
        .quantity("laserAbsorption", 80.0, "%")
        .quantity("laserReflectivity", 55.0, "%")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    let energy: Vec<_> = issues
        .iter()
        .filter(|i| i.rule.as_deref() == Some("energy_conservation"))
        .collect();
    assert_eq!(energy.len(), 1);
    assert_eq!(energy[0].severity, Severity::Error);
    assert_eq!(energy[0].kind, IssueKind::OutOfRange);
    assert_eq!(energy[0].pass, ValidationPass::Relationship);
}

#[test]
fn energy_rule_reads_aliases() {
    let material = MaterialBuilder::new("Aliased", "metal")
        .quantity("absorptivity", 80.0, "%")
        .quantity("reflectance", 55.0, "%")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    assert_eq!(
        issues
            .iter()
            .filter(|i| i.rule.as_deref() == Some("energy_conservation"))
            .count(),
        1
    );
}

#[test]
fn thermal_destruction_aliases_are_equivalent() {
    let v = validator();
    let store = ceramic_store();
    let via_alias = MaterialBuilder::new("Brick", "ceramic")
        .quantity("density", 2.0, "g/cm³")
        .quantity("sinteringPoint", 1450.0, "K")
        .build();
    let canonical = MaterialBuilder::new("Brick", "ceramic")
        .quantity("density", 2.0, "g/cm³")
        .quantity("thermalDestruction", 1450.0, "K")
        .build();
    assert_eq!(
        v.validate(&via_alias, &store).unwrap(),
        v.validate(&canonical, &store).unwrap()
    );
}

#[test]
fn missing_required_property_is_reported_once() {
    let mut material = alumina();
    material.properties.remove("hardness");
    let issues = validator().validate(&material, &ceramic_store()).unwrap();
    let missing = of_kind(&issues, IssueKind::MissingRequiredProperty);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].property, "hardness");
    assert_eq!(missing[0].severity, Severity::Error);
}

#[test]
fn explicit_missing_value_counts_as_absent() {
    let material = MaterialBuilder::new("Alumina", "ceramic")
        .quantity("density", 3.95, "g/cm³")
        .missing("hardness")
        .quantity("sinteringPoint", 2345.0, "K")
        .build();
    let issues = validator().validate(&material, &ceramic_store()).unwrap();
    assert_eq!(of_kind(&issues, IssueKind::MissingRequiredProperty).len(), 1);
    assert!(of_kind(&issues, IssueKind::NeedsResearch).is_empty());
}

#[test]
fn complete_ceramic_is_clean() {
    let issues = validator().validate(&alumina(), &ceramic_store()).unwrap();
    assert!(issues.is_empty(), "{issues:#?}");
}

#[test]
fn unknown_unit_is_an_error() {
    let material = MaterialBuilder::new("Lead", "metal")
        .quantity("density", 700.0, "lb/ft³")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    let invalid = of_kind(&issues, IssueKind::InvalidUnit);
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].severity, Severity::Error);
    assert!(of_kind(&issues, IssueKind::OutOfRange).is_empty());
}

#[test]
fn negative_density_is_a_data_integrity_error() {
    let material = MaterialBuilder::new("Antimatter", "metal")
        .quantity("density", -1.0, "g/cm³")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    let integrity = of_kind(&issues, IssueKind::DataIntegrity);
    assert_eq!(integrity.len(), 1);
    assert_eq!(integrity[0].property, "density");
    assert!(of_kind(&issues, IssueKind::OutOfRange).is_empty());
}

#[test]
fn percentage_above_hundred_is_a_data_integrity_error() {
    let material = MaterialBuilder::new("Sponge", "stone")
        .quantity("porosity", 140.0, "%")
        .build();
    let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
    assert_eq!(of_kind(&issues, IssueKind::DataIntegrity).len(), 1);
}

#[test]
fn equivalent_units_give_equivalent_findings() {
    let v = validator();
    let store = metal_store();
    let summary = |unit: &str, value: f64| -> Vec<(Severity, IssueKind, String)> {
        let material = MaterialBuilder::new("Osmium", "metal")
            .quantity("density", value, unit)
            .build();
        v.validate(&material, &store)
            .unwrap()
            .into_iter()
            .map(|i| (i.severity, i.kind, i.property))
            .collect()
    };
    assert_eq!(summary("g/cm³", 2.7), summary("kg/m³", 2700.0));
    assert_eq!(summary("g/cm³", 30.0), summary("kg/m³", 30000.0));
    assert_eq!(summary("g/cm³", 30.0)[0].1, IssueKind::OutOfRange);
}

#[test]
fn stored_range_in_other_unit_is_converted() {
    let store = MemoryRangeStore::with_ranges([range("ceramic", "density", 1500.0, 15700.0, "kg/m³")])
        .unwrap();
    let material = MaterialBuilder::new("Alumina", "ceramic")
        .quantity("density", 3.95, "g/cm³")
        .build();
    let issues = validator().validate(&material, &store).unwrap();
    assert!(issues
        .iter()
        .all(|i| i.property != "density" || i.kind == IssueKind::MissingRequiredProperty));
}

#[test]
fn slack_separates_warning_from_error() {
    let store = MemoryRangeStore::with_ranges([range("metal", "density", 1.0, 10.0, "g/cm³")]).unwrap();
    let v = validator();
    let severity = |value: f64| {
        let material = MaterialBuilder::new("M", "metal").quantity("density", value, "g/cm³").build();
        of_kind(&v.validate(&material, &store).unwrap(), IssueKind::OutOfRange)
            .first()
            .map(|i| i.severity)
    };
    assert_eq!(severity(5.0), None);
    assert_eq!(severity(10.5), Some(Severity::Warning));
    assert_eq!(severity(12.0), Some(Severity::Error));
}

#[test]
fn missing_range_needs_research() {
    let material = MaterialBuilder::new("Gallium", "metal")
        .quantity("density", 5.9, "g/cm³")
        .build();
    let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
    let research = of_kind(&issues, IssueKind::NeedsResearch);
    assert_eq!(research.len(), 1);
    assert_eq!(research[0].severity, Severity::Warning);
    assert_eq!(research[0].property, "density");
}

#[test]
fn qualitative_values_are_exempt() {
    let material = MaterialBuilder::new("Granite", "stone")
        .qualitative("density", "dense")
        .qualitative("crystalStructure", "granular")
        .qualitative("porosity", "low")
        .build();
    let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
    assert!(of_kind(&issues, IssueKind::NeedsResearch).is_empty());
    assert!(issues.iter().all(|i| i.pass == ValidationPass::Category || i.severity != Severity::Error));
    // Qualitative still satisfies the category's required set.
    assert!(of_kind(&issues, IssueKind::MissingRequiredProperty).is_empty());
}

#[test]
fn low_confidence_is_a_warning() {
    let material = MaterialBuilder::new("Rumor", "metal")
        .quantity_at("density", 2.7, "g/cm³", 0.4)
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    let low = of_kind(&issues, IssueKind::LowConfidence);
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].severity, Severity::Warning);
}

#[test]
fn duplicate_aliases_warn() {
    let material = MaterialBuilder::new("Twice", "metal")
        .quantity("meltingPoint", 933.0, "K")
        .quantity("melting_point", 934.0, "K")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    let dup = of_kind(&issues, IssueKind::DuplicateProperty);
    assert_eq!(dup.len(), 1);
    assert_eq!(dup[0].property, "thermalDestruction");
}

#[test]
fn null_alias_does_not_shadow_a_measured_sibling() {
    let material = matprop_core::Material::from_yaml_str(
        r#"
name: Bronze
category: metal
properties:
  meltingPoint:
  sinteringPoint: { value: 1700, unit: K }
"#,
    )
    .unwrap();
    let issues = validator().validate(&material, &metal_store()).unwrap();

    let dup = of_kind(&issues, IssueKind::DuplicateProperty);
    assert_eq!(dup.len(), 1);
    assert!(dup[0].message.contains("using 'sinteringPoint'"), "{}", dup[0].message);
    assert!(of_kind(&issues, IssueKind::MissingRequiredProperty)
        .iter()
        .all(|i| i.property != "thermalDestruction"));
}

#[test]
fn category_case_does_not_matter() {
    let material = matprop_core::Material::new("Alumina", "Ceramic").with_property(
        "density",
        matprop_core::PropertyValue::quantitative("density", 3.95, "g/cm³", 0.9, None).unwrap(),
    );
    assert_eq!(material.category, "ceramic");

    let issues = validator().validate(&material, &ceramic_store()).unwrap();
    assert!(of_kind(&issues, IssueKind::UnknownCategory).is_empty());
    assert!(of_kind(&issues, IssueKind::NeedsResearch).is_empty(), "{issues:#?}");
    let mut missing: Vec<&str> = of_kind(&issues, IssueKind::MissingRequiredProperty)
        .iter()
        .map(|i| i.property.as_str())
        .collect();
    missing.sort();
    assert_eq!(missing, vec!["hardness", "thermalDestruction"]);
}

#[test]
fn unknown_property_and_category_are_info() {
    let material = MaterialBuilder::new("Thing", "widget")
        .quantity("sparkle", 3.0, "stars")
        .build();
    let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
    assert_eq!(issues.len(), 2, "{issues:#?}");
    assert!(issues.iter().all(|i| i.severity == Severity::Info));
    assert_eq!(of_kind(&issues, IssueKind::UnknownProperty)[0].property, "sparkle");
    assert_eq!(of_kind(&issues, IssueKind::UnknownCategory).len(), 1);
}

#[test]
fn forbidden_property_is_a_warning() {
    let material = MaterialBuilder::new("Marble", "stone")
        .quantity("density", 2.7, "g/cm³")
        .quantity("porosity", 1.0, "%")
        .quantity("electricalConductivity", 0.001, "MS/m")
        .build();
    let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
    let unexpected = of_kind(&issues, IssueKind::UnexpectedProperty);
    assert_eq!(unexpected.len(), 1);
    assert_eq!(unexpected[0].severity, Severity::Warning);
}

#[test]
fn diffusivity_mismatch_is_flagged() {
    // Aluminium: 237 / (2.70 × 897) × 1000 ≈ 97.9 mm²/s
    let consistent = MaterialBuilder::new("Al", "metal")
        .quantity("thermalDiffusivity", 97.0, "mm²/s")
        .quantity("thermalConductivity", 237.0, "W/(m·K)")
        .quantity("density", 2.70, "g/cm³")
        .quantity("specificHeat", 897.0, "J/(kg·K)")
        .build();
    let mut broken = consistent.clone();
    broken
        .properties
        .insert("thermalDiffusivity".into(), test_fixtures::quantity(40.0, "mm²/s"));

    let v = validator();
    let store = metal_store();
    let rule = |issues: &[ValidationIssue]| -> Vec<Severity> {
        issues
            .iter()
            .filter(|i| i.rule.as_deref() == Some("thermal_diffusivity"))
            .map(|i| i.severity)
            .collect()
    };
    assert!(rule(&v.validate(&consistent, &store).unwrap()).is_empty());
    assert_eq!(rule(&v.validate(&broken, &store).unwrap()), vec![Severity::Error]);
}

#[test]
fn modulus_strength_ratio_uses_category_range() {
    // Steel: 200 GPa / 400 MPa = 500, inside metal [50, 2000]
    let steel = MaterialBuilder::new("Steel", "metal")
        .quantity("youngsModulus", 200.0, "GPa")
        .quantity("tensileStrength", 400.0, "MPa")
        .build();
    // 200 GPa / 1 MPa = 200000, far outside
    let mut bogus = steel.clone();
    bogus
        .properties
        .insert("tensileStrength".into(), test_fixtures::quantity(1.0, "MPa"));

    let v = validator();
    let store = MemoryRangeStore::new();
    let ratio = |issues: Vec<ValidationIssue>| -> Vec<ValidationIssue> {
        issues.into_iter().filter(|i| i.kind == IssueKind::RatioViolation).collect()
    };
    assert!(ratio(v.validate(&steel, &store).unwrap()).is_empty());
    let flagged = ratio(v.validate(&bogus, &store).unwrap());
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].rule.as_deref(), Some("modulus_strength_ratio"));
    assert_eq!(flagged[0].severity, Severity::Error);
}

#[test]
fn relationship_with_a_missing_input_is_skipped() {
    let material = MaterialBuilder::new("Half", "metal")
        .quantity("laserAbsorption", 99.0, "%")
        .missing("laserReflectivity")
        .build();
    let issues = validator().validate(&material, &metal_store()).unwrap();
    assert!(issues.iter().all(|i| i.rule.is_none()));
}

#[test]
fn revalidate_is_scoped() {
    let v = validator();
    let material = MaterialBuilder::new("Gallium", "metal")
        .quantity("density", 5.9, "g/cm³")
        .quantity("hardness", 10.0, "HV")
        .build();
    let scope = ["hardness".to_string()].into_iter().collect();
    let report = v.revalidate(&material, &MemoryRangeStore::new(), &scope).unwrap();
    assert!(report.category.is_empty());
    assert!(report.property.iter().all(|i| i.property == "hardness"));
    assert_eq!(report.needs_research().into_iter().collect::<Vec<_>>(), vec!["hardness"]);
}

proptest! {
    #[test]
    fn repeated_validation_is_identical(
        value in -50.0f64..5000.0,
        unit in prop::sample::select(vec!["g/cm³", "kg/m³", "furlongs"]),
        confidence in 0.0f64..=1.0,
    ) {
        let v = validator();
        let store = metal_store();
        let material = MaterialBuilder::new("P", "metal")
            .quantity_at("density", value, unit, confidence)
            .build();
        let first = v.validate(&material, &store).unwrap();
        let second = v.validate(&material, &store).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn qualitative_text_never_needs_research(text in "[a-zA-Z ]{1,20}") {
        let material = MaterialBuilder::new("Q", "metal")
            .qualitative("density", &text)
            .qualitative("hardness", &text)
            .build();
        let issues = validator().validate(&material, &MemoryRangeStore::new()).unwrap();
        prop_assert!(issues.iter().all(|i| i.kind != IssueKind::NeedsResearch));
    }
}
