//! Relationship pass: cross-property physical consistency.
//!
//! A rule is evaluated only when every input is present, quantitative, and
//! in an accepted unit. Anything less means "not evaluated", never an issue.

use std::collections::BTreeSet;

use matprop_core::{IssueKind, PropertyValue, Severity, ValidationIssue, ValidationPass};

use super::ResolvedMaterial;
use crate::rules::{RelationshipKind, RelationshipRule, RuleRegistry};

/// Run the relationship pass. With `scope`, only rules reading a scoped
/// property are evaluated.
pub fn run(
    resolved: &ResolvedMaterial<'_>,
    rules: &RuleRegistry,
    scope: Option<&BTreeSet<String>>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for rule in rules.relationship_rules() {
        if scope.is_some_and(|s| !rule.touches(s)) {
            continue;
        }
        let Some(values) = canonical_inputs(resolved, rules, rule) else {
            continue;
        };
        let ratio_range = rules
            .property_rule(&rule.properties[0])
            .and_then(|p| p.ratio_range(resolved.category()));
        let Some(measure) = evaluate(rule.kind, &values, ratio_range) else {
            continue;
        };

        let severity = if measure > rule.hard_tolerance {
            Severity::Error
        } else if rule.soft_tolerance.is_some_and(|soft| measure > soft) {
            Severity::Warning
        } else {
            continue;
        };

        let (kind, message) = describe(rule, measure, ratio_range);
        issues.push(
            ValidationIssue::new(
                severity,
                kind,
                ValidationPass::Relationship,
                resolved.name(),
                rule.properties[0].as_str(),
                message,
            )
            .with_rule(&rule.id),
        );
    }

    issues
}

fn canonical_inputs(
    resolved: &ResolvedMaterial<'_>,
    rules: &RuleRegistry,
    rule: &RelationshipRule,
) -> Option<Vec<f64>> {
    rule.properties
        .iter()
        .map(|name| {
            let PropertyValue::Quantitative(m) = resolved.get(name)? else {
                return None;
            };
            rules.property_rule(name)?.to_canonical(m.value(), m.unit())
        })
        .collect()
}

/// Non-negative measure for a relationship, or None when the formula is
/// undefined for these inputs (zero divisor, no ratio range for the category).
///
/// Inputs are in canonical units:
/// - energy: absorption %, reflectivity %
/// - diffusivity: α mm²/s, k W/(m·K), ρ g/cm³, cp J/(kg·K)
/// - ratio: E GPa, σ MPa
/// - conductivity: σ MS/m, ρ µΩ·m
pub fn evaluate(kind: RelationshipKind, v: &[f64], ratio_range: Option<(f64, f64)>) -> Option<f64> {
    match (kind, v) {
        (RelationshipKind::EnergyConservation, [absorption, reflectivity]) => {
            Some(absorption + reflectivity)
        }
        (RelationshipKind::Diffusivity, [alpha, k, rho, cp]) => {
            // k / (ρ·1000 · cp) m²/s → ×1e6 mm²/s
            let expected = k * 1000.0 / (rho * cp);
            if !expected.is_finite() || expected <= 0.0 {
                return None;
            }
            Some((alpha - expected).abs() / expected)
        }
        (RelationshipKind::ModulusStrengthRatio, [modulus, strength]) => {
            let (lo, hi) = ratio_range?;
            if *strength <= 0.0 {
                return None;
            }
            let ratio = modulus * 1000.0 / strength;
            Some(if ratio < lo {
                (lo - ratio) / lo
            } else if ratio > hi {
                (ratio - hi) / hi
            } else {
                0.0
            })
        }
        (RelationshipKind::ConductivityResistivity, [sigma, rho]) => Some((sigma * rho - 1.0).abs()),
        _ => None,
    }
}

fn describe(
    rule: &RelationshipRule,
    measure: f64,
    ratio_range: Option<(f64, f64)>,
) -> (IssueKind, String) {
    match rule.kind {
        RelationshipKind::EnergyConservation => (
            IssueKind::OutOfRange,
            format!(
                "{} + {} = {measure}% exceeds {}%",
                rule.properties[0], rule.properties[1], rule.hard_tolerance
            ),
        ),
        RelationshipKind::Diffusivity => (
            IssueKind::RelationshipViolation,
            format!(
                "{} deviates {:.1}% from conductivity / (density × specific heat)",
                rule.properties[0],
                measure * 100.0
            ),
        ),
        RelationshipKind::ModulusStrengthRatio => {
            let (lo, hi) = ratio_range.unwrap_or_default();
            (
                IssueKind::RatioViolation,
                format!(
                    "{}/{} ratio is {:.1}% outside the expected [{lo}, {hi}]",
                    rule.properties[0],
                    rule.properties[1],
                    measure * 100.0
                ),
            )
        }
        RelationshipKind::ConductivityResistivity => (
            IssueKind::RelationshipViolation,
            format!(
                "{} × {} deviates from 1 by {measure:.3}",
                rule.properties[0], rule.properties[1]
            ),
        ),
    }
}
