//! Rule definition errors. Raised while building the rule registry;
//! any of these aborts engine initialization.

use super::error_code::{self, MatpropErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("rule document parse error: {message}")]
    Parse { message: String },

    #[error("rule '{rule}' is missing required field '{field}'")]
    MissingField { rule: String, field: String },

    #[error("property rule '{property}' declares no allowed units")]
    NoAllowedUnits { property: String },

    #[error("rule '{rule}' references undefined property '{property}'")]
    UndefinedProperty { rule: String, property: String },

    #[error("property rule '{property}' has an invalid unit table: {message}")]
    InvalidUnits { property: String, message: String },

    #[error("relationship '{id}' expects {expected} properties, found {found}")]
    WrongArity {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate rule id '{id}'")]
    DuplicateRule { id: String },

    #[error("invalid bounds in rule '{rule}': {message}")]
    InvalidBounds { rule: String, message: String },

    #[error("relationship '{id}' has unknown kind '{kind}'")]
    UnknownRelationship { id: String, kind: String },
}

impl MatpropErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
