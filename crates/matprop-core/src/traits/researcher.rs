use crate::models::{RangeResult, ResearchRequest};

/// Derives a range for a (category, property) the store has no entry for.
///
/// Implementations perform no persistence and no retries.
pub trait IRangeResearcher: Send + Sync {
    fn research(&self, request: &ResearchRequest) -> RangeResult;
}
