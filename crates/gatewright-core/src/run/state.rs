//! Run state and result enums.

use serde::{Deserialize, Serialize};

use super::error::FrameworkError;

/// State machine states for a gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    /// Run created, no gate started yet.
    Initialized,

    /// Safety gate (gate -1) in progress.
    RunningSafety,

    /// Planning gate (gate 0) in progress.
    RunningPlanning,

    /// CI gate (gate 1) in progress.
    RunningCi,

    /// Staging gate (gate 2) in progress.
    RunningStaging,

    /// Production gate (gate 3) in progress.
    RunningProduction,

    /// Learning gate (gate 4) in progress.
    RunningLearning,

    /// All gates resolved successfully. Terminal.
    Completed,

    /// Manually blocked for intervention. Terminal.
    Blocked,

    /// A gate failed. Terminal.
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RunState {
    /// Parses a run state from a string.
    ///
    /// Accepts both `SCREAMING_SNAKE_CASE` (canonical) and lowercase forms.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::InvalidRunState` if the string is not a
    /// recognized state.
    pub fn parse(s: &str) -> Result<Self, FrameworkError> {
        match s.to_uppercase().as_str() {
            "INITIALIZED" => Ok(Self::Initialized),
            "RUNNING_SAFETY" => Ok(Self::RunningSafety),
            "RUNNING_PLANNING" => Ok(Self::RunningPlanning),
            "RUNNING_CI" => Ok(Self::RunningCi),
            "RUNNING_STAGING" => Ok(Self::RunningStaging),
            "RUNNING_PRODUCTION" => Ok(Self::RunningProduction),
            "RUNNING_LEARNING" => Ok(Self::RunningLearning),
            "COMPLETED" => Ok(Self::Completed),
            "BLOCKED" => Ok(Self::Blocked),
            "FAILED" => Ok(Self::Failed),
            _ => Err(FrameworkError::InvalidRunState {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "INITIALIZED",
            Self::RunningSafety => "RUNNING_SAFETY",
            Self::RunningPlanning => "RUNNING_PLANNING",
            Self::RunningCi => "RUNNING_CI",
            Self::RunningStaging => "RUNNING_STAGING",
            Self::RunningProduction => "RUNNING_PRODUCTION",
            Self::RunningLearning => "RUNNING_LEARNING",
            Self::Completed => "COMPLETED",
            Self::Blocked => "BLOCKED",
            Self::Failed => "FAILED",
        }
    }

    /// Returns whether this state is terminal.
    ///
    /// No gate execution is valid once a run reaches a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Blocked | Self::Failed)
    }

    /// Returns the progress percentage for this state.
    ///
    /// Progress is a fixed lookup from 0 (`Initialized`) to 100
    /// (`Completed`). `Blocked` and `Failed` return the -1 sentinel since
    /// progress is undefined for non-monotonic outcomes.
    #[must_use]
    pub const fn progress_percentage(&self) -> i8 {
        match self {
            Self::Initialized => 0,
            Self::RunningSafety => 10,
            Self::RunningPlanning => 25,
            Self::RunningCi => 40,
            Self::RunningStaging => 60,
            Self::RunningProduction => 80,
            Self::RunningLearning => 95,
            Self::Completed => 100,
            Self::Blocked | Self::Failed => -1,
        }
    }
}

/// Overall result of a gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResult {
    /// The run has not reached a terminal state yet.
    Pending,

    /// All gates resolved and the run completed.
    Passed,

    /// A gate failed.
    Failed,

    /// The run was manually blocked.
    Blocked,
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl RunResult {
    /// Parses a run result from a string.
    ///
    /// # Errors
    ///
    /// Returns `FrameworkError::InvalidRunResult` if the string is not a
    /// recognized result.
    pub fn parse(s: &str) -> Result<Self, FrameworkError> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PASSED" => Ok(Self::Passed),
            "FAILED" => Ok(Self::Failed),
            "BLOCKED" => Ok(Self::Blocked),
            _ => Err(FrameworkError::InvalidRunResult {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this result.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Blocked => "BLOCKED",
        }
    }
}
