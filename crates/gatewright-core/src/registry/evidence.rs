//! Evidence records: timestamped assertions about what happened in a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Evidence categories required to fully document a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceCategory {
    /// Evidence about the PR itself (review, approvals).
    Pr,

    /// Evidence from CI execution.
    Ci,

    /// Evidence from a deployment.
    Deploy,

    /// Evidence from post-deploy verification.
    Verify,
}

impl std::fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EvidenceCategory {
    /// Parses an evidence category from a string.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidCategory` if the string is not a
    /// recognized category.
    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        match s.to_uppercase().as_str() {
            "PR" => Ok(Self::Pr),
            "CI" => Ok(Self::Ci),
            "DEPLOY" => Ok(Self::Deploy),
            "VERIFY" => Ok(Self::Verify),
            _ => Err(RegistryError::InvalidCategory {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pr => "PR",
            Self::Ci => "CI",
            Self::Deploy => "DEPLOY",
            Self::Verify => "VERIFY",
        }
    }

    /// Returns all categories. Every one of them is required before a run
    /// counts as fully documented.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pr, Self::Ci, Self::Deploy, Self::Verify]
    }
}

/// Status of a captured evidence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceStatus {
    /// Captured but not yet resolved.
    Pending,

    /// The recorded action succeeded.
    Passed,

    /// The recorded action failed.
    Failed,

    /// The recorded action is blocked on intervention.
    Blocked,
}

impl std::fmt::Display for EvidenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EvidenceStatus {
    /// Parses an evidence status from a string.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidStatus` if the string is not a
    /// recognized status.
    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PASSED" => Ok(Self::Passed),
            "FAILED" => Ok(Self::Failed),
            "BLOCKED" => Ok(Self::Blocked),
            _ => Err(RegistryError::InvalidStatus {
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
            Self::Blocked => "BLOCKED",
        }
    }
}

/// A timestamped, append-only record of something that happened during a
/// run.
///
/// The identity fields (`evidence_id`, `run_id`, `category`) are immutable
/// once the record enters a registry; only `status` and the attached
/// `artifact_ids` list may change afterwards, through registry operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier for this evidence record.
    pub evidence_id: String,

    /// The run this evidence belongs to.
    pub run_id: String,

    /// Category of the recorded action.
    pub category: EvidenceCategory,

    /// Who or what recorded the evidence.
    pub source: String,

    /// Human-readable summary of what happened.
    pub summary: String,

    /// Free-form structured details. Intentionally untyped: this is the
    /// extensibility escape hatch for collaborator-specific payloads.
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,

    /// Status of the recorded action.
    pub status: EvidenceStatus,

    /// IDs of artifacts attached as proof.
    #[serde(default)]
    pub artifact_ids: Vec<String>,

    /// When this evidence was captured.
    pub created_at: DateTime<Utc>,
}

impl Evidence {
    /// Creates a pending evidence record with no details or artifacts.
    #[must_use]
    pub fn new(
        evidence_id: impl Into<String>,
        run_id: impl Into<String>,
        category: EvidenceCategory,
        source: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            evidence_id: evidence_id.into(),
            run_id: run_id.into(),
            category,
            source: source.into(),
            summary: summary.into(),
            details: serde_json::Map::new(),
            status: EvidenceStatus::Pending,
            artifact_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: EvidenceStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the structured details payload.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Map<String, serde_json::Value>) -> Self {
        self.details = details;
        self
    }

    /// Pre-attaches artifact IDs. They are validated against the registry
    /// when the evidence is added.
    #[must_use]
    pub fn with_artifact_ids(mut self, artifact_ids: Vec<String>) -> Self {
        self.artifact_ids = artifact_ids;
        self
    }
}
