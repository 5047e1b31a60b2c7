//! The gate framework: run record and state machine orchestration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::GateRunConfig;
use super::error::FrameworkError;
use super::state::{RunResult, RunState};
use crate::gate::{
    CiCriteria, CiGateResult, GatePipeline, GateStatus, GateType, LearningCriteria,
    LearningGateResult, PlanningCriteria, PlanningGateResult, ProductionCriteria,
    ProductionGateResult, SafetyCriteria, SafetyGateResult, StagingCriteria, StagingGateResult,
};

/// A single gate run through the gate framework.
///
/// The run is the audit record of one governance pass over a PR. It is
/// mutated exclusively by the gate-execution operations and [`block_run`]
/// and is never deleted.
///
/// [`block_run`]: GateFramework::block_run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRun {
    /// Unique identifier for this run.
    pub run_id: String,

    /// The PR number this run validates.
    pub pr_number: u64,

    /// Configuration the run was created with.
    pub config: GateRunConfig,

    /// Current state machine state.
    pub state: RunState,

    /// Overall result. Stays `Pending` until the run reaches a terminal
    /// state.
    pub result: RunResult,

    /// The gate currently expected to execute, if any.
    pub current_gate: Option<GateType>,

    /// Complete pipeline, populated only after all six gates resolved.
    pub pipeline: Option<GatePipeline>,

    /// When the run was created.
    pub started_at: DateTime<Utc>,

    /// When the run reached a terminal state. Never cleared once set.
    pub completed_at: Option<DateTime<Utc>>,

    /// Error message naming the failing gate, set only on failure.
    pub error_message: Option<String>,

    /// Reason for a manual block, set only when blocked.
    pub blocked_reason: Option<String>,
}

impl GateRun {
    fn new(config: GateRunConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            pr_number: config.pr_number,
            config,
            state: RunState::Initialized,
            result: RunResult::Pending,
            current_gate: None,
            pipeline: None,
            started_at: Utc::now(),
            completed_at: None,
            error_message: None,
            blocked_reason: None,
        }
    }

    /// Returns the progress percentage through the gates.
    ///
    /// Delegates to [`RunState::progress_percentage`]: 0 for a fresh run,
    /// 100 when completed, -1 when blocked or failed.
    #[must_use]
    pub const fn progress_percentage(&self) -> i8 {
        self.state.progress_percentage()
    }
}

/// Unified gate validation framework with state machine.
///
/// Orchestrates a run through all gates in sequence, tracking state
/// transitions and producing the gate result values. Gate execution is pure
/// computation over booleans: the actual long-running work (test execution,
/// deployments) happens out-of-band and is reported in as criteria.
///
/// The framework assumes at most one in-flight call per run; callers that
/// share a run across tasks must serialize access externally.
pub struct GateFramework {
    config: GateRunConfig,
    run: GateRun,
}

impl GateFramework {
    /// Creates a framework with a fresh run in `Initialized` state.
    #[must_use]
    pub fn new(config: GateRunConfig) -> Self {
        let run = GateRun::new(config.clone());
        Self { config, run }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &GateRunConfig {
        &self.config
    }

    /// Returns the current run record.
    #[must_use]
    pub const fn run(&self) -> &GateRun {
        &self.run
    }

    /// Consumes the framework and returns the run record.
    #[must_use]
    pub fn into_run(self) -> GateRun {
        self.run
    }

    /// Starts the run, entering the safety gate.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn start_run(&mut self) -> Result<&GateRun, FrameworkError> {
        self.ensure_not_terminal()?;
        debug!(run_id = %self.run.run_id, pr_number = self.run.pr_number, "starting gate run");
        self.run.state = RunState::RunningSafety;
        self.run.current_gate = Some(GateType::Safety);
        Ok(&self.run)
    }

    /// Executes the safety gate (gate -1).
    ///
    /// On pass the run advances to the planning gate; on fail the run is
    /// marked failed. The result value is returned either way.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_safety_gate(
        &mut self,
        criteria: SafetyCriteria,
    ) -> Result<SafetyGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        let result = SafetyGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            self.advance_to(RunState::RunningPlanning, GateType::Planning);
        } else {
            self.fail_run("Safety gate failed");
        }
        Ok(result)
    }

    /// Executes the planning gate (gate 0).
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_planning_gate(
        &mut self,
        criteria: PlanningCriteria,
    ) -> Result<PlanningGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        let result = PlanningGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            self.advance_to(RunState::RunningCi, GateType::Ci);
        } else {
            self.fail_run("Planning gate failed");
        }
        Ok(result)
    }

    /// Executes the CI gate (gate 1).
    ///
    /// On pass the run advances to staging, or directly to production when
    /// `skip_staging` is configured.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_ci_gate(
        &mut self,
        criteria: CiCriteria,
    ) -> Result<CiGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        let result = CiGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            if self.config.skip_staging {
                self.advance_to(RunState::RunningProduction, GateType::Production);
            } else {
                self.advance_to(RunState::RunningStaging, GateType::Staging);
            }
        } else {
            self.fail_run("CI gate failed");
        }
        Ok(result)
    }

    /// Executes the staging gate (gate 2).
    ///
    /// When `skip_staging` is configured this returns a `Skipped` result
    /// without evaluating the criteria. The CI gate normally advances the
    /// state past staging already; if the run is still parked on
    /// `RunningStaging` (out-of-order call), the correct next state is
    /// re-derived here so state consistency holds regardless of call order.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_staging_gate(
        &mut self,
        criteria: StagingCriteria,
    ) -> Result<StagingGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        if self.config.skip_staging {
            debug!(run_id = %self.run.run_id, "staging gate skipped by configuration");
            if self.run.state == RunState::RunningStaging {
                self.advance_past_staging();
            }
            return Ok(StagingGateResult::skipped());
        }

        let result = StagingGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            self.advance_past_staging();
        } else {
            self.fail_run("Staging gate failed");
        }
        Ok(result)
    }

    /// Executes the production gate (gate 3).
    ///
    /// When `skip_production` is configured this returns a `Skipped` result
    /// and advances to the learning gate without evaluating the criteria.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_production_gate(
        &mut self,
        criteria: ProductionCriteria,
    ) -> Result<ProductionGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        if self.config.skip_production {
            debug!(run_id = %self.run.run_id, "production gate skipped by configuration");
            self.advance_to(RunState::RunningLearning, GateType::Learning);
            return Ok(ProductionGateResult::skipped());
        }

        let result = ProductionGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            self.advance_to(RunState::RunningLearning, GateType::Learning);
        } else {
            self.fail_run("Production gate failed");
        }
        Ok(result)
    }

    /// Executes the learning gate (gate 4), the pipeline's last gate.
    ///
    /// On pass the run is completed: `result` becomes `Passed` and `state`
    /// becomes `Completed` (terminal success).
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::RunAlreadyTerminal` if the run already
    /// reached a terminal state.
    pub fn execute_learning_gate(
        &mut self,
        criteria: LearningCriteria,
    ) -> Result<LearningGateResult, FrameworkError> {
        self.ensure_not_terminal()?;
        let result = LearningGateResult::evaluate(criteria);
        if result.status == GateStatus::Passed {
            self.complete_run();
        } else {
            self.fail_run("Learning gate failed");
        }
        Ok(result)
    }

    /// Blocks the run for manual intervention.
    ///
    /// This is an unconditional escape hatch usable from any state: it does
    /// not validate the prior state, records the reason, and stamps the
    /// completion timestamp.
    pub fn block_run(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(run_id = %self.run.run_id, reason = %reason, "gate run blocked");
        self.run.state = RunState::Blocked;
        self.run.result = RunResult::Blocked;
        self.run.blocked_reason = Some(reason);
        self.run.completed_at = Some(Utc::now());
    }

    /// Builds the complete gate pipeline from the six individual results
    /// and stores it on the run.
    pub fn build_pipeline(
        &mut self,
        safety_result: SafetyGateResult,
        planning_result: PlanningGateResult,
        ci_result: CiGateResult,
        staging_result: StagingGateResult,
        production_result: ProductionGateResult,
        learning_result: LearningGateResult,
    ) -> &GatePipeline {
        self.run.pipeline.insert(GatePipeline {
            pr_number: self.config.pr_number,
            safety_gate: safety_result,
            planning_gate: planning_result,
            ci_gate: ci_result,
            staging_gate: staging_result,
            production_gate: production_result,
            learning_gate: learning_result,
        })
    }

    /// Executes a complete mock run through all gates.
    ///
    /// Runs start plus all six gates with all-default (all-pass) criteria
    /// and assembles the pipeline. This is a safety rail for demos and
    /// tests only.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::MockModeRequired` if the run was not
    /// created with `mock_mode=true`, before any state is mutated.
    pub fn execute_full_mock_run(&mut self) -> Result<&GateRun, FrameworkError> {
        if !self.config.mock_mode {
            return Err(FrameworkError::MockModeRequired);
        }

        self.start_run()?;

        let safety_result = self.execute_safety_gate(SafetyCriteria::default())?;
        let planning_result = self.execute_planning_gate(PlanningCriteria::default())?;
        let ci_result = self.execute_ci_gate(CiCriteria::default())?;
        let staging_result = self.execute_staging_gate(StagingCriteria::default())?;
        let production_result = self.execute_production_gate(ProductionCriteria::default())?;
        let learning_result = self.execute_learning_gate(LearningCriteria::default())?;

        self.build_pipeline(
            safety_result,
            planning_result,
            ci_result,
            staging_result,
            production_result,
            learning_result,
        );

        Ok(&self.run)
    }

    fn ensure_not_terminal(&self) -> Result<(), FrameworkError> {
        if self.run.state.is_terminal() {
            return Err(FrameworkError::RunAlreadyTerminal {
                run_id: self.run.run_id.clone(),
                state: self.run.state,
            });
        }
        Ok(())
    }

    fn advance_to(&mut self, state: RunState, gate: GateType) {
        debug!(
            run_id = %self.run.run_id,
            from = %self.run.state,
            to = %state,
            "gate run advancing"
        );
        self.run.state = state;
        self.run.current_gate = Some(gate);
    }

    /// Routes past the staging stage: to learning when `skip_production` is
    /// set, otherwise to production.
    fn advance_past_staging(&mut self) {
        if self.config.skip_production {
            self.advance_to(RunState::RunningLearning, GateType::Learning);
        } else {
            self.advance_to(RunState::RunningProduction, GateType::Production);
        }
    }

    fn fail_run(&mut self, message: &str) {
        warn!(run_id = %self.run.run_id, error = message, "gate run failed");
        self.run.state = RunState::Failed;
        self.run.result = RunResult::Failed;
        self.run.error_message = Some(message.to_string());
        self.run.completed_at = Some(Utc::now());
    }

    fn complete_run(&mut self) {
        debug!(run_id = %self.run.run_id, "gate run completed");
        self.run.state = RunState::Completed;
        self.run.result = RunResult::Passed;
        self.run.completed_at = Some(Utc::now());
    }
}

/// Creates and executes a mock gate run for the given PR.
///
/// Convenience for demos and tests: builds a mock-mode config, runs all
/// gates with passing criteria, and returns the completed run.
///
/// # Errors
///
/// Returns `FrameworkError` if any orchestration step is rejected; this
/// cannot happen for a fresh mock-mode config.
pub fn create_mock_gate_run(
    pr_number: u64,
    run_id: impl Into<String>,
) -> Result<GateRun, FrameworkError> {
    let config = GateRunConfig::new(pr_number, run_id);
    let mut framework = GateFramework::new(config);
    framework.execute_full_mock_run()?;
    Ok(framework.into_run())
}
