//! Gate taxonomy and results for the PR validation pipeline.
//!
//! A gate is a named checkpoint that must pass before the next delivery
//! stage is considered authorized. The pipeline runs six gates in a fixed
//! order:
//!
//! ```text
//! Safety (-1) -> Planning (0) -> CI (1) -> Staging (2) -> Production (3) -> Learning (4)
//! ```
//!
//! Each gate produces an immutable result value holding the boolean
//! sub-criteria it was evaluated against plus a [`GateStatus`]. Results are
//! never mutated in place; re-running a gate is a new run and produces a new
//! result. [`GatePipeline`] aggregates exactly one result per gate for a PR
//! and derives merge and production readiness from the statuses.

mod error;
mod pipeline;
mod result;


use serde::{Deserialize, Serialize};

pub use error::GateError;
pub use pipeline::GatePipeline;
pub use result::{
    CiCriteria, CiGateResult, LearningCriteria, LearningGateResult, PlanningCriteria,
    PlanningGateResult, ProductionCriteria, ProductionGateResult, SafetyCriteria,
    SafetyGateResult, StagingCriteria, StagingGateResult,
};

/// The six gate checkpoints in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateType {
    /// Gate -1: no forbidden paths, secrets, or permission violations.
    Safety,

    /// Gate 0: PRD, test plan, and deploy plan are all present.
    Planning,

    /// Gate 1: lint, unit tests, security scan, and dependency checks.
    Ci,

    /// Gate 2: staging deployment with smoke tests and attached evidence.
    Staging,

    /// Gate 3: production deployment, verification, and rollback readiness.
    Production,

    /// Gate 4: post-run report and knowledge artifacts.
    Learning,
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl GateType {
    /// Parses a gate type from a string.
    ///
    /// Accepts both `SCREAMING_SNAKE_CASE` (canonical) and lowercase forms.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidGateType` if the string is not a
    /// recognized gate.
    pub fn parse(s: &str) -> Result<Self, GateError> {
        match s.to_uppercase().as_str() {
            "SAFETY" => Ok(Self::Safety),
            "PLANNING" => Ok(Self::Planning),
            "CI" => Ok(Self::Ci),
            "STAGING" => Ok(Self::Staging),
            "PRODUCTION" => Ok(Self::Production),
            "LEARNING" => Ok(Self::Learning),
            _ => Err(GateError::InvalidGateType {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this gate type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safety => "SAFETY",
            Self::Planning => "PLANNING",
            Self::Ci => "CI",
            Self::Staging => "STAGING",
            Self::Production => "PRODUCTION",
            Self::Learning => "LEARNING",
        }
    }

    /// Returns the blueprint gate number (Safety is gate -1, Learning is
    /// gate 4).
    #[must_use]
    pub const fn gate_number(&self) -> i8 {
        match self {
            Self::Safety => -1,
            Self::Planning => 0,
            Self::Ci => 1,
            Self::Staging => 2,
            Self::Production => 3,
            Self::Learning => 4,
        }
    }

    /// Returns all gates in pipeline order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Safety,
            Self::Planning,
            Self::Ci,
            Self::Staging,
            Self::Production,
            Self::Learning,
        ]
    }
}

/// Outcome of a single gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    /// The gate has not been evaluated yet.
    Pending,

    /// All required sub-criteria were true.
    Passed,

    /// At least one required sub-criterion was false.
    Failed,

    /// The gate was bypassed by run configuration. Skipped means "not
    /// verified", never "passed".
    Skipped,
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl GateStatus {
    /// Parses a gate status from a string.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidGateStatus` if the string is not a
    /// recognized status.
    pub fn parse(s: &str) -> Result<Self, GateError> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PASSED" => Ok(Self::Passed),
            "FAILED" => Ok(Self::Failed),
            "SKIPPED" => Ok(Self::Skipped),
            _ => Err(GateError::InvalidGateStatus {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }
}
