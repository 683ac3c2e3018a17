//! Auto-remediation: detect missing ranges, research, persist, retry once.

pub mod gate;
pub mod orchestrator;

pub use gate::ResearchGate;
pub use orchestrator::{RemediationOrchestrator, RemediationOutcome, RemediationState};
