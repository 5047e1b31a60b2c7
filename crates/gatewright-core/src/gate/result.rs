//! Immutable gate result values and their criteria inputs.
//!
//! Each gate takes a small criteria struct of named booleans. Every
//! criterion defaults to `true` so that mock all-pass runs can use
//! `Criteria::default()`. Evaluation produces a new result value; results
//! are never mutated after construction.

use serde::{Deserialize, Serialize};

use super::GateStatus;

/// Sub-criteria for the safety gate (gate -1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyCriteria {
    /// No forbidden paths were touched.
    pub forbidden_paths_checked: bool,
    /// No secrets leaked.
    pub secrets_checked: bool,
    /// Permissions are valid.
    pub permissions_valid: bool,
}

impl Default for SafetyCriteria {
    fn default() -> Self {
        Self {
            forbidden_paths_checked: true,
            secrets_checked: true,
            permissions_valid: true,
        }
    }
}

/// Sub-criteria for the planning gate (gate 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningCriteria {
    /// PRD or definition-of-done provided.
    pub prd_provided: bool,
    /// Test plan provided.
    pub test_plan_provided: bool,
    /// Deploy and verify plan provided.
    pub deploy_plan_provided: bool,
}

impl Default for PlanningCriteria {
    fn default() -> Self {
        Self {
            prd_provided: true,
            test_plan_provided: true,
            deploy_plan_provided: true,
        }
    }
}

/// Sub-criteria for the CI gate (gate 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiCriteria {
    /// Linting passed.
    pub lint_passed: bool,
    /// Unit tests passed.
    pub unit_tests_passed: bool,
    /// Security scan passed.
    pub security_scan_passed: bool,
    /// Dependency and budget policy check passed.
    pub dependency_check_passed: bool,
}

impl Default for CiCriteria {
    fn default() -> Self {
        Self {
            lint_passed: true,
            unit_tests_passed: true,
            security_scan_passed: true,
            dependency_check_passed: true,
        }
    }
}

/// Sub-criteria for the staging gate (gate 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingCriteria {
    /// PR SHA deployed to staging.
    pub deployed_to_staging: bool,
    /// Smoke tests passed on staging.
    pub smoke_tests_passed: bool,
    /// Evidence of successful deployment attached.
    pub evidence_attached: bool,
}

impl Default for StagingCriteria {
    fn default() -> Self {
        Self {
            deployed_to_staging: true,
            smoke_tests_passed: true,
            evidence_attached: true,
        }
    }
}

/// Sub-criteria for the production gate (gate 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCriteria {
    /// Main SHA deployed to production.
    pub deployed_to_production: bool,
    /// Production verification passed.
    pub verification_passed: bool,
    /// Auto rollback configured and ready.
    pub rollback_ready: bool,
}

impl Default for ProductionCriteria {
    fn default() -> Self {
        Self {
            deployed_to_production: true,
            verification_passed: true,
            rollback_ready: true,
        }
    }
}

/// Sub-criteria for the learning gate (gate 4).
///
/// `suggestion_created` is informational only and does not affect pass or
/// fail; it defaults to `false` since most runs identify no improvements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningCriteria {
    /// Post-run report generated.
    pub post_run_report_generated: bool,
    /// Knowledge artifacts created.
    pub knowledge_artifacts_created: bool,
    /// Suggestion PR or issue created if improvements were identified.
    pub suggestion_created: bool,
}

impl Default for LearningCriteria {
    fn default() -> Self {
        Self {
            post_run_report_generated: true,
            knowledge_artifacts_created: true,
            suggestion_created: false,
        }
    }
}

/// Result of the safety gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyGateResult {
    /// No forbidden paths were touched.
    pub forbidden_paths_checked: bool,
    /// No secrets leaked.
    pub secrets_checked: bool,
    /// Permissions are valid.
    pub permissions_valid: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl SafetyGateResult {
    /// Evaluates the safety gate against the given criteria.
    #[must_use]
    pub const fn evaluate(criteria: SafetyCriteria) -> Self {
        let all_passed = criteria.forbidden_paths_checked
            && criteria.secrets_checked
            && criteria.permissions_valid;
        Self {
            forbidden_paths_checked: criteria.forbidden_paths_checked,
            secrets_checked: criteria.secrets_checked,
            permissions_valid: criteria.permissions_valid,
            status: status_for(all_passed),
        }
    }
}

/// Result of the planning gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningGateResult {
    /// PRD or definition-of-done provided.
    pub prd_provided: bool,
    /// Test plan provided.
    pub test_plan_provided: bool,
    /// Deploy and verify plan provided.
    pub deploy_plan_provided: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl PlanningGateResult {
    /// Evaluates the planning gate against the given criteria.
    #[must_use]
    pub const fn evaluate(criteria: PlanningCriteria) -> Self {
        let all_passed = criteria.prd_provided
            && criteria.test_plan_provided
            && criteria.deploy_plan_provided;
        Self {
            prd_provided: criteria.prd_provided,
            test_plan_provided: criteria.test_plan_provided,
            deploy_plan_provided: criteria.deploy_plan_provided,
            status: status_for(all_passed),
        }
    }
}

/// Result of the CI gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiGateResult {
    /// Linting passed.
    pub lint_passed: bool,
    /// Unit tests passed.
    pub unit_tests_passed: bool,
    /// Security scan passed.
    pub security_scan_passed: bool,
    /// Dependency and budget policy check passed.
    pub dependency_check_passed: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl CiGateResult {
    /// Evaluates the CI gate against the given criteria.
    #[must_use]
    pub const fn evaluate(criteria: CiCriteria) -> Self {
        let all_passed = criteria.lint_passed
            && criteria.unit_tests_passed
            && criteria.security_scan_passed
            && criteria.dependency_check_passed;
        Self {
            lint_passed: criteria.lint_passed,
            unit_tests_passed: criteria.unit_tests_passed,
            security_scan_passed: criteria.security_scan_passed,
            dependency_check_passed: criteria.dependency_check_passed,
            status: status_for(all_passed),
        }
    }
}

/// Result of the staging gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingGateResult {
    /// PR SHA deployed to staging.
    pub deployed_to_staging: bool,
    /// Smoke tests passed on staging.
    pub smoke_tests_passed: bool,
    /// Evidence of successful deployment attached.
    pub evidence_attached: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl StagingGateResult {
    /// Evaluates the staging gate against the given criteria.
    #[must_use]
    pub const fn evaluate(criteria: StagingCriteria) -> Self {
        let all_passed = criteria.deployed_to_staging
            && criteria.smoke_tests_passed
            && criteria.evidence_attached;
        Self {
            deployed_to_staging: criteria.deployed_to_staging,
            smoke_tests_passed: criteria.smoke_tests_passed,
            evidence_attached: criteria.evidence_attached,
            status: status_for(all_passed),
        }
    }

    /// Returns a skipped result. Nothing was verified.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            deployed_to_staging: false,
            smoke_tests_passed: false,
            evidence_attached: false,
            status: GateStatus::Skipped,
        }
    }
}

/// Result of the production gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionGateResult {
    /// Main SHA deployed to production.
    pub deployed_to_production: bool,
    /// Production verification passed.
    pub verification_passed: bool,
    /// Auto rollback configured and ready.
    pub rollback_ready: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl ProductionGateResult {
    /// Evaluates the production gate against the given criteria.
    #[must_use]
    pub const fn evaluate(criteria: ProductionCriteria) -> Self {
        let all_passed = criteria.deployed_to_production
            && criteria.verification_passed
            && criteria.rollback_ready;
        Self {
            deployed_to_production: criteria.deployed_to_production,
            verification_passed: criteria.verification_passed,
            rollback_ready: criteria.rollback_ready,
            status: status_for(all_passed),
        }
    }

    /// Returns a skipped result. Nothing was verified.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            deployed_to_production: false,
            verification_passed: false,
            rollback_ready: false,
            status: GateStatus::Skipped,
        }
    }
}

/// Result of the learning gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningGateResult {
    /// Post-run report generated.
    pub post_run_report_generated: bool,
    /// Knowledge artifacts created.
    pub knowledge_artifacts_created: bool,
    /// Suggestion PR or issue created if improvements were identified.
    pub suggestion_created: bool,
    /// Outcome of the evaluation.
    pub status: GateStatus,
}

impl LearningGateResult {
    /// Evaluates the learning gate against the given criteria.
    ///
    /// The learning gate has softer requirements: it passes as long as the
    /// report and knowledge artifacts exist, regardless of
    /// `suggestion_created`.
    #[must_use]
    pub const fn evaluate(criteria: LearningCriteria) -> Self {
        let all_passed =
            criteria.post_run_report_generated && criteria.knowledge_artifacts_created;
        Self {
            post_run_report_generated: criteria.post_run_report_generated,
            knowledge_artifacts_created: criteria.knowledge_artifacts_created,
            suggestion_created: criteria.suggestion_created,
            status: status_for(all_passed),
        }
    }
}

const fn status_for(all_passed: bool) -> GateStatus {
    if all_passed {
        GateStatus::Passed
    } else {
        GateStatus::Failed
    }
}
