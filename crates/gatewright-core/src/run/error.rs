//! Run framework error types.

use thiserror::Error;

use super::state::RunState;

/// Errors that can occur during gate run orchestration.
///
/// Note that a gate FAILING is not an error: failed gates are returned as
/// ordinary result values and recorded on the run. These variants cover
/// caller misuse only, and each one aborts the offending call before any
/// run state is mutated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameworkError {
    /// `execute_full_mock_run` was invoked on a run without mock mode.
    #[error("full mock run requires mock_mode=true in config")]
    MockModeRequired,

    /// A gate execution was attempted after the run reached a terminal
    /// state.
    #[error("run {run_id} is already terminal in state {state}")]
    RunAlreadyTerminal {
        /// The run ID.
        run_id: String,
        /// The terminal state the run is in.
        state: RunState,
    },

    /// Invalid run state string.
    #[error("invalid run state: {value}")]
    InvalidRunState {
        /// The invalid value.
        value: String,
    },

    /// Invalid run result string.
    #[error("invalid run result: {value}")]
    InvalidRunResult {
        /// The invalid value.
        value: String,
    },
}
