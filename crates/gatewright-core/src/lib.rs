//! Core library for the Gatewright PR-governance service.
//!
//! Gatewright walks a pull request through an ordered pipeline of compliance
//! gates and keeps an indexed, append-only record of the evidence proving
//! each gate's requirements were met. This crate contains the pure,
//! synchronous core; webhook transport, GitHub adapters, and HTTP routing
//! live in the surrounding service and drive this crate as a library.
//!
//! # Architecture
//!
//! ```text
//! webhook / API collaborators
//!         |
//!         v
//! +------------------+     gate results      +------------------+
//! |  GateFramework   | --------------------> |   GatePipeline   |
//! |  (run state      |                       |  (readiness      |
//! |   machine)       |                       |   predicates)    |
//! +------------------+                       +------------------+
//!         |
//!         | evidence + artifacts
//!         v
//! +------------------+
//! |     Registry     |
//! |  (run/PR/kind    |
//! |   indexes)       |
//! +------------------+
//! ```
//!
//! # Modules
//!
//! - [`gate`]: gate taxonomy, the six immutable gate result values, and the
//!   [`GatePipeline`](gate::GatePipeline) aggregate with derived merge and
//!   production readiness.
//! - [`run`]: the [`GateFramework`](run::GateFramework) state machine that
//!   drives a single run through the gate sequence with skip and failure
//!   short-circuit semantics.
//! - [`registry`]: the append-only evidence and artifact
//!   [`Registry`](registry::Registry) with secondary indexes by run, PR
//!   number, and artifact kind.
//!
//! # Example
//!
//! ```rust
//! use gatewright_core::run::{GateFramework, GateRunConfig};
//!
//! let config = GateRunConfig::new(123, "run-001");
//! let mut framework = GateFramework::new(config);
//! let run = framework.execute_full_mock_run().unwrap();
//!
//! let pipeline = run.pipeline.as_ref().unwrap();
//! assert!(pipeline.is_ready_for_merge());
//! assert!(pipeline.is_production_ready());
//! ```
//!
//! # Concurrency
//!
//! All types in this crate are plain value types with no interior locking.
//! At most one in-flight call per [`run::GateFramework`] or
//! [`registry::Registry`] instance is supported; callers that serve
//! concurrent requests must serialize access externally.

pub mod gate;
pub mod registry;
pub mod run;

pub use gate::{GatePipeline, GateStatus, GateType};
pub use registry::{Artifact, ArtifactKind, ArtifactStorage, Evidence, Registry, RegistryError};
pub use run::{
    FrameworkError, GateFramework, GateRun, GateRunConfig, RunResult, RunState,
    create_mock_gate_run,
};
