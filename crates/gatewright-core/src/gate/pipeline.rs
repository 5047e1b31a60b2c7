//! Complete gate pipeline for a single PR.

use serde::{Deserialize, Serialize};

use super::result::{
    CiGateResult, LearningGateResult, PlanningGateResult, ProductionGateResult, SafetyGateResult,
    StagingGateResult,
};
use super::GateStatus;

/// The aggregate of all six gate results for one PR.
///
/// A pipeline is constructed only once all six results exist. Readiness is
/// derived from gate statuses on every call and never stored redundantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePipeline {
    /// The PR number this pipeline was evaluated for.
    pub pr_number: u64,
    /// Safety gate result (gate -1).
    pub safety_gate: SafetyGateResult,
    /// Planning gate result (gate 0).
    pub planning_gate: PlanningGateResult,
    /// CI gate result (gate 1).
    pub ci_gate: CiGateResult,
    /// Staging gate result (gate 2).
    pub staging_gate: StagingGateResult,
    /// Production gate result (gate 3).
    pub production_gate: ProductionGateResult,
    /// Learning gate result (gate 4).
    pub learning_gate: LearningGateResult,
}

impl GatePipeline {
    /// Returns whether the PR is ready to merge.
    ///
    /// True iff the safety, planning, and CI gates all passed. Staging,
    /// production, and learning outcomes are irrelevant here.
    #[must_use]
    pub fn is_ready_for_merge(&self) -> bool {
        self.safety_gate.status == GateStatus::Passed
            && self.planning_gate.status == GateStatus::Passed
            && self.ci_gate.status == GateStatus::Passed
    }

    /// Returns whether the change is verified in production.
    ///
    /// True iff the PR is merge-ready and the staging and production gates
    /// both passed. A `Skipped` staging or production gate does NOT satisfy
    /// this predicate: skipping means the stage was never verified, so a
    /// local or dev run can never be reported as production-ready.
    #[must_use]
    pub fn is_production_ready(&self) -> bool {
        self.is_ready_for_merge()
            && self.staging_gate.status == GateStatus::Passed
            && self.production_gate.status == GateStatus::Passed
    }
}
