use crate::errors::MatpropResult;
use crate::models::{CategoryRange, RemediationRecord};

/// Durable key-value store of category ranges plus the remediation audit log.
///
/// Reads may run concurrently. Writes are serialized by the implementation,
/// and every write is atomic: a reader sees either the old entry or the new
/// one, never a partial range.
pub trait IRangeStore: Send + Sync {
    // --- Ranges ---
    fn lookup(&self, category: &str, property: &str) -> MatpropResult<Option<CategoryRange>>;

    /// Insert or overwrite the entry for `range.key()`. Idempotent.
    fn upsert(&self, range: &CategoryRange) -> MatpropResult<()>;

    /// Insert only if no entry exists. Returns whichever entry is stored
    /// afterwards, so a losing writer observes the winner's value.
    fn insert_if_absent(&self, range: &CategoryRange) -> MatpropResult<CategoryRange>;

    /// Every range stored for one category.
    fn ranges_for_category(&self, category: &str) -> MatpropResult<Vec<CategoryRange>>;
    fn all_ranges(&self) -> MatpropResult<Vec<CategoryRange>>;

    /// Store a researched range and its audit record in one atomic write.
    ///
    /// With `replace` the range overwrites any stored entry; otherwise it is
    /// only inserted when the key is absent. The record is appended exactly
    /// when the range is written. Returns whether it was written; `false`
    /// means another writer's entry is already stored and nothing changed.
    fn persist_remediation(
        &self,
        range: &CategoryRange,
        record: &RemediationRecord,
        replace: bool,
    ) -> MatpropResult<bool>;

    // --- Audit log (append-only) ---
    fn append_record(&self, record: &RemediationRecord) -> MatpropResult<()>;
    fn records(&self) -> MatpropResult<Vec<RemediationRecord>>;
}
