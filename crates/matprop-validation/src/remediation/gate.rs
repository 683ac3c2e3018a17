//! Per-key research gate.
//!
//! At most one worker researches a given (category, property) at a time.
//! Later arrivals block on the key's mutex, then re-check the store and
//! find the winner's range already persisted.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use matprop_core::errors::{MatpropResult, StorageError};
use matprop_core::RangeKey;

#[derive(Debug, Default)]
pub struct ResearchGate {
    locks: DashMap<RangeKey, Arc<Mutex<()>>>,
}

impl ResearchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the gate for `key`.
    pub fn with_key<F, T>(&self, key: &RangeKey, f: F) -> MatpropResult<T>
    where
        F: FnOnce() -> MatpropResult<T>,
    {
        // Clone the Arc out so the shard lock is released before blocking.
        let lock = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().map_err(|_| StorageError::LockPoisoned {
            what: format!("research gate {key}"),
        })?;
        f()
    }

    /// Number of keys that have ever been gated.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// True when no key has ever been gated.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
