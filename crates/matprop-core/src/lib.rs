//! # matprop-core
//!
//! Foundation crate for the matprop property validation engine.
//! Defines the material and range models, issue types, errors, config,
//! storage/research traits, and constants shared by every other crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MatpropConfig;
pub use errors::{MatpropError, MatpropResult};
pub use models::{
    CategoryRange, IssueKind, Material, Measurement, PropertyValue, RangeKey, RangeMethod,
    RemediationRecord, Severity, ValidationIssue, ValidationPass,
};
pub use traits::{CancellationToken, IRangeResearcher, IRangeStore};
