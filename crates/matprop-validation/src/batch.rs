//! Parallel batch validation.
//!
//! Materials are independent, so each runs `validate_with_population` on a
//! rayon worker against the whole batch as the observed population. A
//! failure is recorded on that material's report and never aborts siblings.
//! Cancellation is checked before each material starts.

use matprop_core::config::BatchConfig;
use matprop_core::errors::{ConfigError, MatpropResult};
use matprop_core::traits::Cancellable;
use matprop_core::{
    CancellationToken, IRangeStore, Material, RemediationRecord, Severity, ValidationIssue,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::remediation::{RemediationOrchestrator, RemediationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    /// Validation ran to completion (issues may still contain errors).
    Validated,
    /// An engine failure (storage, data integrity) stopped this material.
    Failed,
    /// The batch was cancelled before this material started.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialReport {
    pub material: String,
    pub status: MaterialStatus,
    pub issues: Vec<ValidationIssue>,
    pub records: Vec<RemediationRecord>,
    pub state: Option<RemediationState>,
    pub error: Option<String>,
}

impl MaterialReport {
    /// Validated with no error-severity issues.
    pub fn passed(&self) -> bool {
        self.status == MaterialStatus::Validated && !self.issues.iter().any(ValidationIssue::is_error)
    }

    fn cancelled(material: &Material) -> Self {
        Self {
            material: material.name.clone(),
            status: MaterialStatus::Cancelled,
            issues: Vec::new(),
            records: Vec::new(),
            state: None,
            error: None,
        }
    }
}

/// One report per input material, in input order, plus totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub reports: Vec<MaterialReport>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub records_written: usize,
    pub cancelled: bool,
}

impl BatchReport {
    fn summarize(reports: Vec<MaterialReport>) -> Self {
        let mut summary = Self::default();
        for report in &reports {
            for issue in &report.issues {
                match issue.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => summary.infos += 1,
                }
            }
            summary.records_written += report.records.len();
            match report.status {
                MaterialStatus::Cancelled => summary.skipped += 1,
                _ if report.passed() => summary.passed += 1,
                _ => summary.failed += 1,
            }
        }
        summary.cancelled = summary.skipped > 0;
        summary.reports = reports;
        summary
    }
}

pub struct BatchValidator {
    orchestrator: RemediationOrchestrator,
    pool: rayon::ThreadPool,
}

impl BatchValidator {
    /// `config.workers == 0` lets rayon pick the thread count.
    pub fn new(orchestrator: RemediationOrchestrator, config: &BatchConfig) -> MatpropResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("matprop-batch-{i}"))
            .build()
            .map_err(|e| ConfigError::ValidationFailed {
                field: "batch.workers".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { orchestrator, pool })
    }

    pub fn orchestrator(&self) -> &RemediationOrchestrator {
        &self.orchestrator
    }

    /// Threads in the batch pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Validate every material with remediation, using the whole batch as the
    /// research population. Reports come back in input order; cancellation is
    /// checked before each material starts.
    pub fn run(
        &self,
        materials: &[Material],
        store: &dyn IRangeStore,
        cancel: &CancellationToken,
    ) -> BatchReport {
        tracing::info!(materials = materials.len(), workers = self.workers(), "batch started");

        let reports: Vec<MaterialReport> = self.pool.install(|| {
            materials
                .par_iter()
                .map(|material| self.run_one(material, materials, store, cancel))
                .collect()
        });

        let summary = BatchReport::summarize(reports);
        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            records = summary.records_written,
            cancelled = summary.cancelled,
            "batch finished"
        );
        summary
    }

    fn run_one(
        &self,
        material: &Material,
        population: &[Material],
        store: &dyn IRangeStore,
        cancel: &CancellationToken,
    ) -> MaterialReport {
        if cancel.is_cancelled() {
            return MaterialReport::cancelled(material);
        }
        match self
            .orchestrator
            .validate_with_population(material, store, population)
        {
            Ok(outcome) => MaterialReport {
                material: material.name.clone(),
                status: MaterialStatus::Validated,
                issues: outcome.issues,
                records: outcome.records,
                state: Some(outcome.state),
                error: None,
            },
            Err(e) => {
                tracing::warn!(material = %material.name, error = %e, "material failed");
                MaterialReport {
                    material: material.name.clone(),
                    status: MaterialStatus::Failed,
                    issues: Vec::new(),
                    records: Vec::new(),
                    state: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
