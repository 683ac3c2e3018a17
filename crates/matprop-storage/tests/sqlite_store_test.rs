//! SqliteRangeStore behaviour: persistence, write semantics, the audit log.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use matprop_core::errors::MatpropError;
use matprop_core::{CategoryRange, IRangeStore, RangeMethod, RemediationRecord};
use matprop_storage::migrations::{current_version, LATEST_VERSION};
use matprop_storage::SqliteRangeStore;

fn range(category: &str, property: &str, min: f64, max: f64) -> CategoryRange {
    CategoryRange::quantitative(
        category,
        property,
        Some(min),
        Some(max),
        "g/cm³",
        0.75,
        RangeMethod::Statistical,
        true,
    )
    .unwrap()
    .with_timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

fn open_temp() -> (SqliteRangeStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteRangeStore::open(&dir.path().join("ranges.db"), 2).unwrap();
    (store, dir)
}

#[test]
fn migrations_set_user_version() {
    let (store, _dir) = open_temp();
    let version = store.database().with_writer(current_version).unwrap();
    assert_eq!(version, LATEST_VERSION);
}

#[test]
fn file_store_uses_wal_and_pooled_readers() {
    let (store, _dir) = open_temp();
    assert_eq!(store.database().journal_mode().unwrap(), "wal");
    assert_eq!(store.database().reader_count(), 2);
    store.database().checkpoint().unwrap();
}

#[test]
fn in_memory_store_reads_through_the_writer() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    assert_eq!(store.database().reader_count(), 0);
    assert!(store.database().path().is_none());
    store.upsert(&range("metal", "density", 1.0, 2.0)).unwrap();
    assert!(store.lookup("metal", "density").unwrap().is_some());
}

#[test]
fn readers_refuse_writes() {
    let (store, _dir) = open_temp();
    let err = store
        .database()
        .with_reader(|conn| {
            conn.execute("DELETE FROM category_ranges", [])
                .map_err(|e| matprop_core::errors::StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
        .unwrap_err();
    assert!(matches!(err, matprop_core::errors::StorageError::SqliteError { .. }));
}

#[test]
fn ranges_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranges.db");
    let original = range("metal", "density", 1.7, 22.6);
    {
        let store = SqliteRangeStore::open(&path, 2).unwrap();
        store.upsert(&original).unwrap();
        store
            .append_record(&RemediationRecord::from_range("Aluminum", &original))
            .unwrap();
    }
    let store = SqliteRangeStore::open(&path, 2).unwrap();
    assert_eq!(store.lookup("metal", "density").unwrap(), Some(original));
    assert_eq!(store.records().unwrap().len(), 1);
}

#[test]
fn timestamps_keep_sub_second_precision() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let r = range("metal", "density", 1.0, 2.0)
        .with_timestamp(Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap());
    store.upsert(&r).unwrap();
    assert_eq!(store.lookup("metal", "density").unwrap().unwrap().updated_at, r.updated_at);
}

#[test]
fn upsert_is_idempotent() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let r = range("metal", "density", 1.7, 22.6);
    store.upsert(&r).unwrap();
    store.upsert(&r).unwrap();
    assert_eq!(store.range_count().unwrap(), 1);
    assert_eq!(store.all_ranges().unwrap(), vec![r]);
}

#[test]
fn upsert_replaces_existing_entry() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    store.upsert(&range("metal", "density", 1.0, 2.0)).unwrap();
    store.upsert(&range("metal", "density", 3.0, 4.0)).unwrap();
    let got = store.lookup("metal", "density").unwrap().unwrap();
    assert_eq!((got.min, got.max), (Some(3.0), Some(4.0)));
}

#[test]
fn insert_if_absent_returns_the_winner() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let first = store.insert_if_absent(&range("metal", "density", 1.0, 2.0)).unwrap();
    let second = store.insert_if_absent(&range("metal", "density", 8.0, 9.0)).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.min, Some(1.0));
}

#[test]
fn qualitative_entry_round_trips() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let q = CategoryRange::qualitative("stone", "crystalStructure");
    store.upsert(&q).unwrap();
    let got = store.lookup("stone", "crystalStructure").unwrap().unwrap();
    assert!(got.qualitative);
    assert_eq!((got.min, got.max), (None, None));
}

#[test]
fn invalid_range_never_reaches_the_table() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let mut bad = range("metal", "density", 1.0, 2.0);
    bad.max = Some(0.5);
    let err = store.upsert(&bad).unwrap_err();
    assert!(matches!(err, MatpropError::DataIntegrity(_)));
    assert_eq!(store.range_count().unwrap(), 0);
}

#[test]
fn ranges_for_category_is_sorted_and_filtered() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    store.upsert(&range("metal", "thermalConductivity", 5.0, 430.0)).unwrap();
    store.upsert(&range("metal", "density", 1.7, 22.6)).unwrap();
    store.upsert(&range("stone", "density", 1.5, 3.5)).unwrap();

    let metal: Vec<String> = store
        .ranges_for_category("metal")
        .unwrap()
        .into_iter()
        .map(|r| r.property)
        .collect();
    assert_eq!(metal, vec!["density", "thermalConductivity"]);
}

#[test]
fn persist_remediation_commits_range_and_record_together() {
    let (store, _dir) = open_temp();
    let first = range("metal", "density", 1.0, 2.0);
    let record = RemediationRecord::from_range("Iron", &first);
    assert!(store.persist_remediation(&first, &record, false).unwrap());

    let second = range("metal", "density", 5.0, 6.0);
    let lost = RemediationRecord::from_range("Steel", &second);
    assert!(!store.persist_remediation(&second, &lost, false).unwrap());
    assert_eq!(store.lookup("metal", "density").unwrap().unwrap().min, Some(1.0));
    let names: Vec<String> = store.records().unwrap().into_iter().map(|r| r.material).collect();
    assert_eq!(names, vec![record.material]);

    assert!(store.persist_remediation(&second, &lost, true).unwrap());
    assert_eq!(store.lookup("metal", "density").unwrap().unwrap().min, Some(5.0));
    assert_eq!(store.record_count().unwrap(), 2);
}

#[test]
fn remediation_log_rejects_update_and_delete() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    let r = range("metal", "density", 1.0, 2.0);
    store.append_record(&RemediationRecord::from_range("Steel", &r)).unwrap();

    let (update_err, delete_err) = store
        .database()
        .with_writer(|conn| {
            let update = conn
                .execute("UPDATE remediation_log SET material = 'x'", [])
                .unwrap_err();
            let delete = conn.execute("DELETE FROM remediation_log", []).unwrap_err();
            Ok((update.to_string(), delete.to_string()))
        })
        .unwrap();
    assert!(update_err.contains("append-only"));
    assert!(delete_err.contains("append-only"));
    assert_eq!(store.record_count().unwrap(), 1);
}

#[test]
fn records_keep_insertion_order() {
    let store = SqliteRangeStore::open_in_memory().unwrap();
    for name in ["A", "B", "C"] {
        let r = range("metal", "density", 1.0, 2.0);
        store.append_record(&RemediationRecord::from_range(name, &r)).unwrap();
    }
    let names: Vec<String> = store.records().unwrap().into_iter().map(|r| r.material).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn concurrent_insert_if_absent_agrees_on_one_entry() {
    let (store, _dir) = open_temp();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let lo = i as f64;
                store
                    .insert_if_absent(&range("glass", "density", lo, lo + 1.0))
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<CategoryRange> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(store.range_count().unwrap(), 1);
    assert_eq!(store.lookup("glass", "density").unwrap().as_ref(), Some(&results[0]));
}

#[test]
fn opens_from_storage_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = matprop_core::config::StorageConfig {
        db_path: dir.path().join("nested.db").display().to_string(),
        read_pool_size: 3,
    };
    let store = SqliteRangeStore::from_config(&config).unwrap();
    assert_eq!(store.database().reader_count(), 3);
    assert_eq!(store.range_count().unwrap(), 0);
}
