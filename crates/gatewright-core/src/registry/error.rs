//! Registry error types.

use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Validation errors (duplicates, run mismatches, unknown ids on mutation)
/// are fatal to the single call that triggered them and never leave the
/// registry partially mutated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// An artifact with this ID is already registered.
    #[error("artifact already exists: {artifact_id}")]
    DuplicateArtifact {
        /// The duplicate artifact ID.
        artifact_id: String,
    },

    /// Evidence with this ID already exists.
    #[error("evidence already exists: {evidence_id}")]
    DuplicateEvidence {
        /// The duplicate evidence ID.
        evidence_id: String,
    },

    /// Artifact not found.
    #[error("artifact not found: {artifact_id}")]
    ArtifactNotFound {
        /// The artifact ID that was not found.
        artifact_id: String,
    },

    /// Evidence not found.
    #[error("evidence not found: {evidence_id}")]
    EvidenceNotFound {
        /// The evidence ID that was not found.
        evidence_id: String,
    },

    /// An artifact's run does not match the evidence it is attached to.
    #[error(
        "artifact {artifact_id} belongs to run {artifact_run_id}, \
         but evidence {evidence_id} belongs to run {evidence_run_id}"
    )]
    RunMismatch {
        /// The evidence ID.
        evidence_id: String,
        /// The run the evidence belongs to.
        evidence_run_id: String,
        /// The artifact ID.
        artifact_id: String,
        /// The run the artifact belongs to.
        artifact_run_id: String,
    },

    /// Invalid artifact kind string.
    #[error("invalid artifact kind: {value}")]
    InvalidKind {
        /// The invalid value.
        value: String,
    },

    /// Invalid evidence category string.
    #[error("invalid evidence category: {value}")]
    InvalidCategory {
        /// The invalid value.
        value: String,
    },

    /// Invalid evidence status string.
    #[error("invalid evidence status: {value}")]
    InvalidStatus {
        /// The invalid value.
        value: String,
    },
}
