//! Validation issues. Produced fresh per call, never persisted by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InvalidUnit,
    OutOfRange,
    RatioViolation,
    RelationshipViolation,
    MissingRequiredProperty,
    NeedsResearch,
    LowConfidence,
    UnexpectedProperty,
    DataIntegrity,
    DuplicateProperty,
    UnknownProperty,
    UnknownCategory,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUnit => "invalid_unit",
            Self::OutOfRange => "out_of_range",
            Self::RatioViolation => "ratio_violation",
            Self::RelationshipViolation => "relationship_violation",
            Self::MissingRequiredProperty => "missing_required_property",
            Self::NeedsResearch => "needs_research",
            Self::LowConfidence => "low_confidence",
            Self::UnexpectedProperty => "unexpected_property",
            Self::DataIntegrity => "data_integrity",
            Self::DuplicateProperty => "duplicate_property",
            Self::UnknownProperty => "unknown_property",
            Self::UnknownCategory => "unknown_category",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validator pass that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPass {
    Property,
    Relationship,
    Category,
}

/// A single finding against one material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub pass: ValidationPass,
    pub material: String,
    /// Canonical property name.
    pub property: String,
    /// Relationship rule id, for issues raised by the relationship pass.
    pub rule: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        pass: ValidationPass,
        material: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            pass,
            material: material.into(),
            property: property.into(),
            rule: None,
            message: message.into(),
        }
    }

    /// Tag the issue with the relationship rule that raised it.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}.{}: {}",
            self.severity, self.kind, self.material, self.property, self.message
        )
    }
}
