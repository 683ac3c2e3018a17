//! Property pass: units, physical bounds, category ranges, confidence.

use std::collections::BTreeSet;

use matprop_core::config::ValidationConfig;
use matprop_core::errors::MatpropResult;
use matprop_core::{
    CategoryRange, IRangeStore, IssueKind, Measurement, PropertyValue, Severity, ValidationIssue,
    ValidationPass,
};

use super::ResolvedMaterial;
use crate::rules::{PropertyRule, RuleRegistry};

/// Run the property pass. With `scope`, only the named canonical properties
/// are checked.
pub fn run(
    resolved: &ResolvedMaterial<'_>,
    rules: &RuleRegistry,
    store: &dyn IRangeStore,
    config: &ValidationConfig,
    scope: Option<&BTreeSet<String>>,
) -> MatpropResult<Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let material = resolved.name();

    for (&canonical, prop) in &resolved.properties {
        if scope.is_some_and(|s| !s.contains(canonical)) {
            continue;
        }

        for dup in resolved.duplicates.iter().filter(|d| d.canonical == canonical) {
            issues.push(issue(
                Severity::Warning,
                IssueKind::DuplicateProperty,
                material,
                canonical,
                format!(
                    "'{}' and '{}' both resolve to '{canonical}'; using '{}'",
                    dup.kept, dup.dropped, dup.kept
                ),
            ));
        }

        if matches!(prop.value, PropertyValue::Missing) {
            continue;
        }

        let Some(rule) = rules.property_rule(canonical) else {
            issues.push(issue(
                Severity::Info,
                IssueKind::UnknownProperty,
                material,
                canonical,
                format!("no rule for property '{}'", prop.raw_name),
            ));
            continue;
        };

        // Qualitative values, and anything a rule marks qualitative, are exempt
        // from every numeric check.
        let PropertyValue::Quantitative(measurement) = prop.value else {
            continue;
        };
        if rule.qualitative {
            continue;
        }

        check_measurement(
            resolved,
            canonical,
            rule,
            measurement,
            store,
            config,
            &mut issues,
        )?;
    }

    Ok(issues)
}

fn check_measurement(
    resolved: &ResolvedMaterial<'_>,
    canonical: &str,
    rule: &PropertyRule,
    m: &Measurement,
    store: &dyn IRangeStore,
    config: &ValidationConfig,
    issues: &mut Vec<ValidationIssue>,
) -> MatpropResult<()> {
    let material = resolved.name();

    match rule.to_canonical(m.value(), m.unit()) {
        None => {
            let allowed: Vec<&str> = rule.units.keys().map(String::as_str).collect();
            issues.push(issue(
                Severity::Error,
                IssueKind::InvalidUnit,
                material,
                canonical,
                format!(
                    "unit '{}' is not accepted for {canonical} (allowed: {})",
                    m.unit(),
                    allowed.join(", ")
                ),
            ));
        }
        Some(value) if !rule.within_global(value) => {
            issues.push(issue(
                Severity::Error,
                IssueKind::DataIntegrity,
                material,
                canonical,
                format!(
                    "{value} {} is physically impossible for {canonical} (bounds [{}, {}])",
                    rule.canonical_unit,
                    fmt_bound(rule.global_min),
                    fmt_bound(rule.global_max)
                ),
            ));
        }
        Some(value) => {
            let range = store.lookup(resolved.category(), canonical)?;
            check_range(resolved, canonical, rule, value, range.as_ref(), config, issues);
        }
    }

    if m.confidence() < config.low_confidence_threshold {
        issues.push(issue(
            Severity::Warning,
            IssueKind::LowConfidence,
            material,
            canonical,
            format!(
                "confidence {} is below {}",
                m.confidence(),
                config.low_confidence_threshold
            ),
        ));
    }
    Ok(())
}

fn check_range(
    resolved: &ResolvedMaterial<'_>,
    canonical: &str,
    rule: &PropertyRule,
    value: f64,
    range: Option<&CategoryRange>,
    config: &ValidationConfig,
    issues: &mut Vec<ValidationIssue>,
) {
    let material = resolved.name();
    let category = resolved.category();

    let range = match range {
        Some(r) if r.qualitative => return,
        Some(r) if r.min.is_some() || r.max.is_some() => r,
        Some(_) => {
            issues.push(issue(
                Severity::Warning,
                IssueKind::NeedsResearch,
                material,
                canonical,
                format!("range for {category}/{canonical} has no bounds"),
            ));
            return;
        }
        None => {
            issues.push(issue(
                Severity::Warning,
                IssueKind::NeedsResearch,
                material,
                canonical,
                format!("no range for {category}/{canonical}"),
            ));
            return;
        }
    };

    let factor = if range.unit.trim().is_empty() || range.unit == rule.canonical_unit {
        Some(1.0)
    } else {
        rule.factor(&range.unit)
    };
    let Some(factor) = factor else {
        issues.push(issue(
            Severity::Error,
            IssueKind::InvalidUnit,
            material,
            canonical,
            format!(
                "stored range for {category}/{canonical} uses unit '{}', which {canonical} does not accept",
                range.unit
            ),
        ));
        return;
    };

    let min = range.min.map(|b| b * factor);
    let max = range.max.map(|b| b * factor);
    if let Some(severity) = classify(value, min, max, config.out_of_range_slack) {
        issues.push(issue(
            severity,
            IssueKind::OutOfRange,
            material,
            canonical,
            format!(
                "{value} {} outside {category} range [{}, {}]",
                rule.canonical_unit,
                fmt_bound(min),
                fmt_bound(max)
            ),
        ));
    }
}

/// None when in range. Otherwise a warning within `slack` × span of the
/// violated bound, an error beyond it. Single-bound or zero-width ranges
/// measure slack against the bound's magnitude.
pub fn classify(value: f64, min: Option<f64>, max: Option<f64>, slack: f64) -> Option<Severity> {
    let (bound, distance) = match (min, max) {
        (Some(lo), _) if value < lo => (lo, lo - value),
        (_, Some(hi)) if value > hi => (hi, value - hi),
        _ => return None,
    };
    let span = match (min, max) {
        (Some(lo), Some(hi)) if hi > lo => hi - lo,
        _ => bound.abs(),
    };
    if distance <= slack * span {
        Some(Severity::Warning)
    } else {
        Some(Severity::Error)
    }
}

fn fmt_bound(bound: Option<f64>) -> String {
    bound.map_or_else(|| "-".to_string(), |b| b.to_string())
}

fn issue(
    severity: Severity,
    kind: IssueKind,
    material: &str,
    property: &str,
    message: String,
) -> ValidationIssue {
    ValidationIssue::new(severity, kind, ValidationPass::Property, material, property, message)
}
