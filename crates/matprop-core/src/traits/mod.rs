pub mod cancellation;
pub mod range_store;
pub mod researcher;

pub use cancellation::{Cancellable, CancellationToken};
pub use range_store::IRangeStore;
pub use researcher::IRangeResearcher;
