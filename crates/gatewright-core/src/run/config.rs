//! Run configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a single gate run.
///
/// Configuration is fixed when the run is created and never mutated
/// mid-run; skip decisions taken during execution always reflect the
/// configuration the run started with. There is no ambient or global
/// settings object: every framework instance owns an explicit config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRunConfig {
    /// The PR number this run validates.
    pub pr_number: u64,

    /// Unique identifier for this run.
    pub run_id: String,

    /// Skip the staging gate (for local dev environments).
    #[serde(default)]
    pub skip_staging: bool,

    /// Skip the production gate (for non-production deployments).
    #[serde(default)]
    pub skip_production: bool,

    /// Run in mock mode (no actual deployments).
    #[serde(default = "default_mock_mode")]
    pub mock_mode: bool,
}

const fn default_mock_mode() -> bool {
    true
}

impl GateRunConfig {
    /// Creates a configuration with no skips and mock mode enabled.
    #[must_use]
    pub fn new(pr_number: u64, run_id: impl Into<String>) -> Self {
        Self {
            pr_number,
            run_id: run_id.into(),
            skip_staging: false,
            skip_production: false,
            mock_mode: true,
        }
    }

    /// Sets whether the staging gate is skipped.
    #[must_use]
    pub fn with_skip_staging(mut self, skip_staging: bool) -> Self {
        self.skip_staging = skip_staging;
        self
    }

    /// Sets whether the production gate is skipped.
    #[must_use]
    pub fn with_skip_production(mut self, skip_production: bool) -> Self {
        self.skip_production = skip_production;
        self
    }

    /// Sets whether the run executes in mock mode.
    #[must_use]
    pub fn with_mock_mode(mut self, mock_mode: bool) -> Self {
        self.mock_mode = mock_mode;
        self
    }
}
