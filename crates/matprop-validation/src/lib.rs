//! # matprop-validation
//!
//! The property validation and auto-remediation engine.
//!
//! - [`alias`]: synonym canonicalization before any rule lookup.
//! - [`rules`]: load-once registry of property, relationship, and category rules.
//! - [`validator`]: three ordered passes (property, relationship, category).
//! - [`research`]: literature, statistical, and heuristic range derivation.
//! - [`remediation`]: detect, research, persist, retry once.
//! - [`batch`]: parallel validation of many materials on a rayon pool.

pub mod alias;
pub mod batch;
pub mod passes;
pub mod remediation;
pub mod research;
pub mod rules;
pub mod validator;

pub use alias::{AliasResolver, VariantTag};
pub use batch::{BatchReport, BatchValidator, MaterialReport, MaterialStatus};
pub use remediation::{RemediationOrchestrator, RemediationOutcome, RemediationState};
pub use research::RangeResearcher;
pub use rules::RuleRegistry;
pub use validator::{PassReport, Validator};
