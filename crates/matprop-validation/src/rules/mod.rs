//! Rule registry: property, relationship, and category rules loaded once
//! from a TOML document and read-only afterwards.

pub mod loader;
pub mod registry;
pub mod types;

pub use registry::RuleRegistry;
pub use types::{CategoryRule, PropertyRule, RelationshipKind, RelationshipRule};
