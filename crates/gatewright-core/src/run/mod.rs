//! Gate run state machine and lifecycle management.
//!
//! This module drives a single governance run through the gate sequence,
//! one gate execution at a time, with deterministic state transitions.
//!
//! # State Machine
//!
//! ```text
//! INITIALIZED --start--> RUNNING_SAFETY --pass--> RUNNING_PLANNING
//!      --pass--> RUNNING_CI --pass--> RUNNING_STAGING
//!      --pass--> RUNNING_PRODUCTION --pass--> RUNNING_LEARNING
//!      --pass--> COMPLETED
//!
//! any gate --fail--> FAILED
//! any state --block_run--> BLOCKED
//! ```
//!
//! `COMPLETED`, `FAILED`, and `BLOCKED` are terminal: once reached, no gate
//! execution is accepted and `completed_at` is never cleared.
//!
//! # Skip Semantics
//!
//! Skips are fixed in [`GateRunConfig`] at run creation:
//!
//! - `skip_staging`: a CI pass routes directly to `RUNNING_PRODUCTION`.
//! - `skip_production`: whatever gate would route to `RUNNING_PRODUCTION`
//!   routes to `RUNNING_LEARNING` instead.
//!
//! Executing a skipped gate is tolerated in any call order: it returns a
//! `Skipped` result and re-derives the correct next state if the run is
//! still parked on the skipped stage.
//!
//! # Failure Semantics
//!
//! Gate failure is data, not an error: the execute call returns the failed
//! result value and marks the run `FAILED` with a message naming the gate.
//! Failed gates are never retried in place; recovery is a new run, so the
//! audit trail never shows a gate's status being overwritten.
//!
//! # Example
//!
//! ```rust
//! use gatewright_core::gate::SafetyCriteria;
//! use gatewright_core::run::{GateFramework, GateRunConfig, RunState};
//!
//! let mut framework = GateFramework::new(GateRunConfig::new(123, "run-001"));
//! framework.start_run().unwrap();
//! let result = framework.execute_safety_gate(SafetyCriteria::default()).unwrap();
//! assert_eq!(framework.run().state, RunState::RunningPlanning);
//! ```

mod config;
mod error;
mod framework;
mod state;


pub use config::GateRunConfig;
pub use error::FrameworkError;
pub use framework::{create_mock_gate_run, GateFramework, GateRun};
pub use state::{RunResult, RunState};
