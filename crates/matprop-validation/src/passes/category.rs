//! Category pass: required and forbidden properties.

use matprop_core::{IssueKind, Severity, ValidationIssue, ValidationPass};

use super::ResolvedMaterial;
use crate::rules::RuleRegistry;

/// Run the category pass: one error per missing required property, one
/// warning per forbidden property present.
pub fn run(resolved: &ResolvedMaterial<'_>, rules: &RuleRegistry) -> Vec<ValidationIssue> {
    let material = resolved.name();
    let category = resolved.category();

    let Some(rule) = rules.category_rule(category) else {
        return vec![ValidationIssue::new(
            Severity::Info,
            IssueKind::UnknownCategory,
            ValidationPass::Category,
            material,
            "",
            format!("no category rule for '{category}'"),
        )];
    };

    let mut issues = Vec::new();
    for required in &rule.required {
        if !resolved.is_present(required) {
            issues.push(ValidationIssue::new(
                Severity::Error,
                IssueKind::MissingRequiredProperty,
                ValidationPass::Category,
                material,
                required.as_str(),
                format!("{category} materials require {required}"),
            ));
        }
    }
    for forbidden in &rule.forbidden {
        if resolved.is_present(forbidden) {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                IssueKind::UnexpectedProperty,
                ValidationPass::Category,
                material,
                forbidden.as_str(),
                format!("{forbidden} is not expected on {category} materials"),
            ));
        }
    }
    issues
}
