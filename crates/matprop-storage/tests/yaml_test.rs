use matprop_core::errors::MatpropError;
use matprop_core::{CategoryRange, IRangeStore, RangeMethod};
use matprop_storage::yaml::{export_ranges, import_ranges, parse_ranges};
use matprop_storage::MemoryRangeStore;

const CURATED: &str = r#"
Metal:
  density:
    min: 1.7
    max: 22.6
    unit: g/cm³
    confidence: 0.95
stone:
  crystalStructure:
    qualitative: true
"#;

#[test]
fn import_normalizes_category_and_defaults_method() {
    let store = MemoryRangeStore::new();
    assert_eq!(import_ranges(&store, CURATED).unwrap(), 2);

    let density = store.lookup("metal", "density").unwrap().unwrap();
    assert_eq!(density.method, RangeMethod::Literature);
    assert!(!density.auto_generated);
    assert!(store.lookup("stone", "crystalStructure").unwrap().unwrap().qualitative);
}

#[test]
fn import_overwrites_auto_generated_entries() {
    let auto = CategoryRange::quantitative(
        "metal",
        "density",
        Some(2.0),
        Some(3.0),
        "g/cm³",
        0.6,
        RangeMethod::Heuristic,
        true,
    )
    .unwrap();
    let store = MemoryRangeStore::with_ranges([auto]).unwrap();
    import_ranges(&store, CURATED).unwrap();
    let got = store.lookup("metal", "density").unwrap().unwrap();
    assert_eq!(got.min, Some(1.7));
    assert!(!got.auto_generated);
}

#[test]
fn export_then_parse_preserves_bounds() {
    let store = MemoryRangeStore::new();
    import_ranges(&store, CURATED).unwrap();
    let yaml = export_ranges(&store).unwrap();
    assert!(yaml.contains("metal:"));

    let parsed = parse_ranges(&yaml).unwrap();
    let density = parsed.iter().find(|r| r.property == "density").unwrap();
    assert_eq!((density.min, density.max), (Some(1.7), Some(22.6)));
    assert_eq!(density.unit, "g/cm³");
}

#[test]
fn inverted_bounds_are_rejected() {
    let yaml = "metal:\n  density:\n    min: 5.0\n    max: 1.0\n    unit: g/cm³\n";
    assert!(matches!(parse_ranges(yaml), Err(MatpropError::DataIntegrity(_))));
}

#[test]
fn qualitative_with_bounds_is_rejected() {
    let yaml = "stone:\n  crystalStructure:\n    qualitative: true\n    min: 1.0\n";
    assert!(parse_ranges(yaml).is_err());
}

#[test]
fn malformed_document_is_a_storage_error() {
    assert!(matches!(parse_ranges("- just\n- a list\n"), Err(MatpropError::Storage(_))));
}
