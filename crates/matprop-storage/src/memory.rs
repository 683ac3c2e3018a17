//! In-memory range store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use matprop_core::errors::{MatpropResult, StorageError};
use matprop_core::{CategoryRange, IRangeStore, RangeKey, RemediationRecord};

/// `RwLock`-guarded map plus an append-only record list. Every write
/// happens under one lock acquisition, so readers never see a partial entry.
#[derive(Debug, Default)]
pub struct MemoryRangeStore {
    ranges: RwLock<BTreeMap<RangeKey, CategoryRange>>,
    records: RwLock<Vec<RemediationRecord>>,
}

impl MemoryRangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from a list of ranges. Later entries overwrite earlier ones.
    pub fn with_ranges(ranges: impl IntoIterator<Item = CategoryRange>) -> MatpropResult<Self> {
        let store = Self::new();
        for range in ranges {
            store.upsert(&range)?;
        }
        Ok(store)
    }

    /// Number of stored ranges. A poisoned lock reads as empty.
    pub fn len(&self) -> usize {
        self.ranges.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(what: &str) -> StorageError {
    StorageError::LockPoisoned {
        what: what.to_string(),
    }
}

impl IRangeStore for MemoryRangeStore {
    fn lookup(&self, category: &str, property: &str) -> MatpropResult<Option<CategoryRange>> {
        let ranges = self.ranges.read().map_err(|_| poisoned("ranges"))?;
        Ok(ranges.get(&RangeKey::new(category, property)).cloned())
    }

    fn upsert(&self, range: &CategoryRange) -> MatpropResult<()> {
        range.check()?;
        let mut ranges = self.ranges.write().map_err(|_| poisoned("ranges"))?;
        ranges.insert(range.key(), range.clone());
        Ok(())
    }

    fn insert_if_absent(&self, range: &CategoryRange) -> MatpropResult<CategoryRange> {
        range.check()?;
        let mut ranges = self.ranges.write().map_err(|_| poisoned("ranges"))?;
        Ok(ranges.entry(range.key()).or_insert_with(|| range.clone()).clone())
    }

    fn ranges_for_category(&self, category: &str) -> MatpropResult<Vec<CategoryRange>> {
        let ranges = self.ranges.read().map_err(|_| poisoned("ranges"))?;
        Ok(ranges
            .values()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }

    fn all_ranges(&self) -> MatpropResult<Vec<CategoryRange>> {
        let ranges = self.ranges.read().map_err(|_| poisoned("ranges"))?;
        Ok(ranges.values().cloned().collect())
    }

    fn persist_remediation(
        &self,
        range: &CategoryRange,
        record: &RemediationRecord,
        replace: bool,
    ) -> MatpropResult<bool> {
        range.check()?;
        // Lock order: ranges, then records.
        let mut ranges = self.ranges.write().map_err(|_| poisoned("ranges"))?;
        let mut records = self.records.write().map_err(|_| poisoned("records"))?;
        let key = range.key();
        if !replace && ranges.contains_key(&key) {
            return Ok(false);
        }
        ranges.insert(key, range.clone());
        records.push(record.clone());
        Ok(true)
    }

    fn append_record(&self, record: &RemediationRecord) -> MatpropResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned("records"))?;
        records.push(record.clone());
        Ok(())
    }

    fn records(&self) -> MatpropResult<Vec<RemediationRecord>> {
        let records = self.records.read().map_err(|_| poisoned("records"))?;
        Ok(records.clone())
    }
}
