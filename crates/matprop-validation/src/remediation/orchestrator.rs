//! RemediationOrchestrator: the top-level entry point.
//!
//! ```text
//! VALIDATING ──clean──▶ DONE
//!     │
//!     └─needs_research─▶ RESEARCHING ─▶ PERSISTING ─▶ RETRYING ─▶ DONE | ESCALATED
//! ```
//!
//! Each (material, property) gets at most one research attempt and one
//! re-validation per call. A `needs_research` produced by the retry is
//! reported, not chased.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use matprop_core::errors::MatpropResult;
use matprop_core::models::{RangeResult, ResearchRequest, UndeterminableReason};
use matprop_core::{
    CategoryRange, IRangeResearcher, IRangeStore, IssueKind, Material, MatpropConfig,
    PropertyValue, RangeKey, RemediationRecord, Severity, ValidationIssue,
};
use serde::{Deserialize, Serialize};

use super::gate::ResearchGate;
use crate::passes::ResolvedMaterial;
use crate::research::RangeResearcher;
use crate::rules::RuleRegistry;
use crate::validator::{PassReport, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationState {
    Validating,
    Researching,
    Persisting,
    Retrying,
    Done,
    Escalated,
}

impl fmt::Display for RemediationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validating => "validating",
            Self::Researching => "researching",
            Self::Persisting => "persisting",
            Self::Retrying => "retrying",
            Self::Done => "done",
            Self::Escalated => "escalated",
        };
        f.write_str(s)
    }
}

/// Result of one `validate_with_remediation` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RemediationOutcome {
    /// Final issue list: property, relationship, category order.
    pub issues: Vec<ValidationIssue>,
    /// Audit records appended during this call.
    pub records: Vec<RemediationRecord>,
    /// Properties still out of range after their single retry.
    pub escalated: Vec<String>,
    /// Properties left with a permanent `needs_research` (insufficient data).
    pub unresolved: Vec<String>,
    /// `Done` or `Escalated`.
    pub state: RemediationState,
}

impl RemediationOutcome {
    /// True when any final issue is an error.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }
}

enum KeyResolution {
    Researched(RemediationRecord),
    /// A range exists now, from another worker or an earlier call.
    AlreadyPresent,
    Qualitative,
    InsufficientData,
}

pub struct RemediationOrchestrator {
    validator: Validator,
    researcher: Arc<dyn IRangeResearcher>,
    gate: ResearchGate,
}

impl RemediationOrchestrator {
    /// Orchestrator with its own research gate.
    pub fn new(validator: Validator, researcher: Arc<dyn IRangeResearcher>) -> Self {
        Self {
            validator,
            researcher,
            gate: ResearchGate::new(),
        }
    }

    /// Validator and researcher configured from `config`.
    pub fn from_config(rules: Arc<RuleRegistry>, config: &MatpropConfig) -> Self {
        Self::new(
            Validator::new(rules, config.validation.clone()),
            Arc::new(RangeResearcher::new(config.research.clone())),
        )
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Remediate using only `material` itself as the observed population.
    pub fn validate_with_remediation(
        &self,
        material: &Material,
        store: &dyn IRangeStore,
    ) -> MatpropResult<RemediationOutcome> {
        self.validate_with_population(material, store, std::slice::from_ref(material))
    }

    /// Remediate, drawing observed values from every material in `population`
    /// that shares `material`'s category.
    pub fn validate_with_population(
        &self,
        material: &Material,
        store: &dyn IRangeStore,
        population: &[Material],
    ) -> MatpropResult<RemediationOutcome> {
        let name = material.name.as_str();
        let mut state = RemediationState::Validating;
        let mut report = self.validator.run(material, store)?;

        let pending = report.needs_research();
        if pending.is_empty() {
            transition(name, &mut state, RemediationState::Done);
            return Ok(RemediationOutcome {
                issues: report.into_issues(),
                records: Vec::new(),
                escalated: Vec::new(),
                unresolved: Vec::new(),
                state,
            });
        }

        transition(name, &mut state, RemediationState::Researching);
        let resolved = self.validator.resolve(material);
        let mut records = Vec::new();
        let mut retry = BTreeSet::new();
        let mut exempt = BTreeSet::new();
        let mut unresolved = Vec::new();

        for property in pending {
            let key = RangeKey::new(resolved.category(), &property);
            match self.resolve_key(&key, &resolved, population, store, &mut state)? {
                KeyResolution::Researched(record) => {
                    records.push(record);
                    retry.insert(property);
                }
                KeyResolution::AlreadyPresent => {
                    retry.insert(property);
                }
                KeyResolution::Qualitative => {
                    exempt.insert(property);
                }
                KeyResolution::InsufficientData => unresolved.push(property),
            }
        }

        if !exempt.is_empty() {
            report
                .property
                .retain(|i| !(i.kind == IssueKind::NeedsResearch && exempt.contains(&i.property)));
        }

        let mut escalated = Vec::new();
        if !retry.is_empty() {
            transition(name, &mut state, RemediationState::Retrying);
            let retried = self.validator.revalidate(material, store, &retry)?;
            report = self.merge(report, retried, &retry, &mut escalated);
        }

        let terminal = if escalated.is_empty() {
            RemediationState::Done
        } else {
            tracing::warn!(material = name, properties = ?escalated, "escalated after retry");
            RemediationState::Escalated
        };
        transition(name, &mut state, terminal);

        Ok(RemediationOutcome {
            issues: report.into_issues(),
            records,
            escalated,
            unresolved,
            state,
        })
    }

    fn resolve_key(
        &self,
        key: &RangeKey,
        resolved: &ResolvedMaterial<'_>,
        population: &[Material],
        store: &dyn IRangeStore,
        state: &mut RemediationState,
    ) -> MatpropResult<KeyResolution> {
        self.gate.with_key(key, || {
            let existing = store.lookup(&key.category, &key.property)?;
            if existing
                .as_ref()
                .is_some_and(|r| r.qualitative || r.min.is_some() || r.max.is_some())
            {
                tracing::debug!(%key, "range already persisted; skipping research");
                return Ok(KeyResolution::AlreadyPresent);
            }

            let request = self.build_request(key, resolved, population);
            let found = match self.researcher.research(&request) {
                RangeResult::Found(found) => found,
                RangeResult::Undeterminable {
                    reason: UndeterminableReason::Qualitative,
                } => return Ok(KeyResolution::Qualitative),
                RangeResult::Undeterminable {
                    reason: UndeterminableReason::InsufficientData,
                } => {
                    tracing::warn!(%key, "range undeterminable: insufficient data");
                    return Ok(KeyResolution::InsufficientData);
                }
            };

            transition(resolved.name(), state, RemediationState::Persisting);
            let range = CategoryRange::quantitative(
                &key.category,
                &key.property,
                Some(found.min),
                Some(found.max),
                found.unit,
                found.confidence,
                found.method,
                true,
            )?;

            // An unbounded placeholder is replaced outright; otherwise the
            // first persisted range wins.
            let record = RemediationRecord::from_range(resolved.name(), &range);
            if !store.persist_remediation(&range, &record, existing.is_some())? {
                tracing::debug!(%key, "lost persist race; using stored range");
                return Ok(KeyResolution::AlreadyPresent);
            }

            tracing::info!(
                %key,
                method = %range.method,
                min = ?range.min,
                max = ?range.max,
                confidence = range.confidence,
                "persisted researched range"
            );
            Ok(KeyResolution::Researched(record))
        })
    }

    fn build_request(
        &self,
        key: &RangeKey,
        resolved: &ResolvedMaterial<'_>,
        population: &[Material],
    ) -> ResearchRequest {
        let rule = self.validator.rules().property_rule(&key.property);
        let canonical = |value: Option<&PropertyValue>| -> Option<f64> {
            let PropertyValue::Quantitative(m) = value? else {
                return None;
            };
            rule?.to_canonical(m.value(), m.unit())
        };

        let observed_values = population
            .iter()
            .map(|m| self.validator.resolve(m))
            .filter(|m| m.category() == key.category)
            .filter_map(|m| canonical(m.get(&key.property)))
            .collect();

        ResearchRequest {
            category: key.category.clone(),
            property: key.property.clone(),
            unit: rule.map(|r| r.canonical_unit.clone()).unwrap_or_default(),
            observed_values,
            current_value: canonical(resolved.get(&key.property)),
            qualitative: rule.is_some_and(|r| r.qualitative),
        }
    }

    /// Splice the retry's issues into the original report. Retried properties
    /// and the relationships that read them take the retry's result; the rest
    /// keep the original. Out-of-range findings on a retried property become
    /// hard errors.
    fn merge(
        &self,
        original: PassReport,
        retried: PassReport,
        retry: &BTreeSet<String>,
        escalated: &mut Vec<String>,
    ) -> PassReport {
        let mut by_property: BTreeMap<String, Vec<ValidationIssue>> = BTreeMap::new();
        for issue in original.property {
            if !retry.contains(&issue.property) {
                by_property.entry(issue.property.clone()).or_default().push(issue);
            }
        }
        for mut issue in retried.property {
            if issue.kind == IssueKind::OutOfRange {
                issue.severity = Severity::Error;
                issue.message.push_str("; still out of range after remediation");
                if !escalated.contains(&issue.property) {
                    escalated.push(issue.property.clone());
                }
            }
            by_property.entry(issue.property.clone()).or_default().push(issue);
        }

        let rules = self.validator.rules().relationship_rules();
        let touched: HashSet<&str> = rules
            .iter()
            .filter(|r| r.touches(retry))
            .map(|r| r.id.as_str())
            .collect();
        let order: HashMap<&str, usize> = rules
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id.as_str(), idx))
            .collect();

        let mut relationship: Vec<ValidationIssue> = original
            .relationship
            .into_iter()
            .filter(|i| i.rule.as_deref().map_or(true, |id| !touched.contains(id)))
            .chain(retried.relationship)
            .collect();
        relationship.sort_by_key(|i| {
            i.rule
                .as_deref()
                .and_then(|id| order.get(id).copied())
                .unwrap_or(usize::MAX)
        });

        PassReport {
            property: by_property.into_values().flatten().collect(),
            relationship,
            category: original.category,
        }
    }
}

fn transition(material: &str, state: &mut RemediationState, next: RemediationState) {
    tracing::debug!(material, from = %state, to = %next, "remediation state");
    *state = next;
}
