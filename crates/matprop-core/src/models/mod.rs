//! Engine data model.

pub mod category_range;
pub mod issue;
pub mod material;
pub mod property_value;
pub mod remediation;
pub mod research;

pub use category_range::{CategoryRange, RangeKey, RangeMethod};
pub use issue::{IssueKind, Severity, ValidationIssue, ValidationPass};
pub use material::{normalize_category, Material, MaterialRecord, PropertyRecord, RawScalar};
pub use property_value::{Measurement, PropertyValue};
pub use remediation::RemediationRecord;
pub use research::{RangeResult, ResearchRequest, ResearchedRange, UndeterminableReason};
