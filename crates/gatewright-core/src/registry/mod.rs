//! Evidence and artifact registry with multi-key indexes.
//!
//! The registry is the durable, queryable record of what happened during
//! gate runs and what proof exists for it. Canonical storage is two
//! insertion-ordered lists (artifacts and evidence); secondary indexes by
//! run ID, PR number, and artifact kind are a pure projection of the
//! canonical lists, rebuilt deterministically after every membership change
//! and never served stale.
//!
//! # Lookup Policy
//!
//! Read-only point lookups ([`Registry::get_artifact`],
//! [`Registry::get_evidence`]) uniformly return `Option`: an unknown ID is
//! an ordinary empty query result. Mutating operations that require an ID
//! to exist ([`Registry::attach_artifact_to_evidence`],
//! [`Registry::update_evidence_status`]) return typed `NotFound` errors so
//! callers can distinguish missing (404) from invalid (400) upstream.
//!
//! # Referential Alignment
//!
//! An evidence record may only reference artifacts from its own run.
//! Violations fail with [`RegistryError::RunMismatch`] and never mutate the
//! registry.
//!
//! # Example
//!
//! ```rust
//! use gatewright_core::registry::{Artifact, ArtifactKind, ArtifactStorage, Registry};
//!
//! let mut registry = Registry::new("registry-001");
//! let artifact = Artifact::new(
//!     "art-001",
//!     "run-001",
//!     ArtifactKind::CiEvidence,
//!     ArtifactStorage::ExternalLink { url: "https://ci.example/runs/1".to_string() },
//!     "CI logs",
//!     "ci-bot",
//! );
//! registry.register_artifact(artifact).unwrap();
//! assert_eq!(registry.artifacts_by_run("run-001").len(), 1);
//! ```

mod artifact;
mod error;
mod evidence;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub use artifact::{Artifact, ArtifactKind, ArtifactStorage};
pub use error::RegistryError;
pub use evidence::{Evidence, EvidenceCategory, EvidenceStatus};

/// One line of a [`RunSummary`] artifact listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactListing {
    /// The artifact ID.
    pub artifact_id: String,
    /// Human-readable name.
    pub name: String,
    /// Kind classification.
    pub kind: ArtifactKind,
    /// When the artifact was created.
    pub created_at: DateTime<Utc>,
    /// Path or URL to access the artifact.
    pub location: String,
}

/// Aggregate view of everything registered for a run.
///
/// This is what reporting collaborators read to answer "what was done for
/// this run".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The run being summarized.
    pub run_id: String,
    /// Total number of artifacts for the run.
    pub total_artifacts: usize,
    /// Artifact counts per kind.
    pub artifacts_by_kind: BTreeMap<ArtifactKind, usize>,
    /// Listing of every artifact, in insertion order.
    pub artifacts: Vec<ArtifactListing>,
}

/// One event in a run's chronological timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// An evidence record was captured.
    Evidence {
        /// The evidence ID.
        id: String,
        /// Category of the evidence.
        category: EvidenceCategory,
        /// Status at the time the timeline was built.
        status: EvidenceStatus,
        /// When the evidence was captured.
        created_at: DateTime<Utc>,
    },

    /// An artifact was registered.
    Artifact {
        /// The artifact ID.
        id: String,
        /// Kind of the artifact.
        kind: ArtifactKind,
        /// Path or URL of the artifact.
        location: String,
        /// When the artifact was created.
        created_at: DateTime<Utc>,
    },
}

impl TimelineEvent {
    /// Returns the event's timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Evidence { created_at, .. } | Self::Artifact { created_at, .. } => *created_at,
        }
    }
}

/// Append-only registry of evidence records and artifacts, indexed by run,
/// PR number, and artifact kind.
///
/// Not internally synchronized: concurrent mutation requires external
/// mutual exclusion per registry instance, since every membership change
/// rebuilds the indexes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RegistrySnapshot")]
pub struct Registry {
    registry_id: String,
    created_at: DateTime<Utc>,
    artifacts: Vec<Artifact>,
    evidence: Vec<Evidence>,

    // Index projections over the canonical lists above. Rebuilt on every
    // membership change; positions refer into the canonical vectors.
    #[serde(skip)]
    artifact_positions: HashMap<String, usize>,
    #[serde(skip)]
    evidence_positions: HashMap<String, usize>,
    #[serde(skip)]
    artifacts_by_run: HashMap<String, Vec<usize>>,
    #[serde(skip)]
    artifacts_by_pr: HashMap<u64, Vec<usize>>,
    #[serde(skip)]
    artifacts_by_kind: HashMap<ArtifactKind, Vec<usize>>,
    #[serde(skip)]
    evidence_by_run: HashMap<String, Vec<usize>>,
}

/// Canonical serialized form of a [`Registry`]. Indexes are derived state
/// and are rebuilt on deserialization.
#[derive(Deserialize)]
struct RegistrySnapshot {
    registry_id: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    artifacts: Vec<Artifact>,
    #[serde(default)]
    evidence: Vec<Evidence>,
}

impl From<RegistrySnapshot> for Registry {
    fn from(snapshot: RegistrySnapshot) -> Self {
        let mut registry = Self {
            registry_id: snapshot.registry_id,
            created_at: snapshot.created_at,
            artifacts: snapshot.artifacts,
            evidence: snapshot.evidence,
            artifact_positions: HashMap::new(),
            evidence_positions: HashMap::new(),
            artifacts_by_run: HashMap::new(),
            artifacts_by_pr: HashMap::new(),
            artifacts_by_kind: HashMap::new(),
            evidence_by_run: HashMap::new(),
        };
        registry.rebuild_indexes();
        registry
    }
}

impl Registry {
    /// Creates an empty registry with the given ID.
    #[must_use]
    pub fn new(registry_id: impl Into<String>) -> Self {
        Self {
            registry_id: registry_id.into(),
            created_at: Utc::now(),
            artifacts: Vec::new(),
            evidence: Vec::new(),
            artifact_positions: HashMap::new(),
            evidence_positions: HashMap::new(),
            artifacts_by_run: HashMap::new(),
            artifacts_by_pr: HashMap::new(),
            artifacts_by_kind: HashMap::new(),
            evidence_by_run: HashMap::new(),
        }
    }

    /// Creates an empty registry with a generated `registry-<uuid>` ID.
    #[must_use]
    pub fn with_generated_id() -> Self {
        Self::new(format!("registry-{}", Uuid::new_v4()))
    }

    /// Returns the registry ID.
    #[must_use]
    pub fn registry_id(&self) -> &str {
        &self.registry_id
    }

    /// Returns when the registry was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Registers a new artifact and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateArtifact` if the ID is already
    /// registered; the registry is left unchanged.
    pub fn register_artifact(&mut self, artifact: Artifact) -> Result<String, RegistryError> {
        if self.artifact_positions.contains_key(&artifact.artifact_id) {
            return Err(RegistryError::DuplicateArtifact {
                artifact_id: artifact.artifact_id,
            });
        }

        debug!(
            artifact_id = %artifact.artifact_id,
            run_id = %artifact.run_id,
            kind = %artifact.kind,
            "artifact registered"
        );
        let artifact_id = artifact.artifact_id.clone();
        self.artifacts.push(artifact);
        self.rebuild_indexes();
        Ok(artifact_id)
    }

    /// Returns the artifact with the given ID, if present.
    #[must_use]
    pub fn get_artifact(&self, artifact_id: &str) -> Option<&Artifact> {
        self.artifact_positions
            .get(artifact_id)
            .map(|&position| &self.artifacts[position])
    }

    /// Returns all artifacts for a run, in insertion order.
    #[must_use]
    pub fn artifacts_by_run(&self, run_id: &str) -> Vec<&Artifact> {
        self.artifacts_by_run
            .get(run_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.artifacts[position])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns all artifacts for a PR, in insertion order.
    #[must_use]
    pub fn artifacts_by_pr(&self, pr_number: u64) -> Vec<&Artifact> {
        self.artifacts_by_pr
            .get(&pr_number)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.artifacts[position])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns all artifacts of a kind, in insertion order.
    #[must_use]
    pub fn artifacts_by_kind(&self, kind: ArtifactKind) -> Vec<&Artifact> {
        self.artifacts_by_kind
            .get(&kind)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.artifacts[position])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deletes an artifact from the registry.
    ///
    /// Returns whether a removal occurred; deleting an unknown ID is an
    /// idempotent no-op. A removal triggers a full index rebuild.
    pub fn delete_artifact(&mut self, artifact_id: &str) -> bool {
        let Some(&position) = self.artifact_positions.get(artifact_id) else {
            return false;
        };
        debug!(artifact_id, "artifact deleted");
        self.artifacts.remove(position);
        self.rebuild_indexes();
        true
    }

    /// Returns the total number of registered artifacts.
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns the total number of evidence records.
    #[must_use]
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }

    /// Returns the aggregate summary of a run's artifacts.
    #[must_use]
    pub fn run_summary(&self, run_id: &str) -> RunSummary {
        let artifacts = self.artifacts_by_run(run_id);
        let mut artifacts_by_kind = BTreeMap::new();
        let mut listing = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            *artifacts_by_kind.entry(artifact.kind).or_insert(0) += 1;
            listing.push(ArtifactListing {
                artifact_id: artifact.artifact_id.clone(),
                name: artifact.name.clone(),
                kind: artifact.kind,
                created_at: artifact.created_at,
                location: artifact.location(),
            });
        }
        RunSummary {
            run_id: run_id.to_string(),
            total_artifacts: listing.len(),
            artifacts_by_kind,
            artifacts: listing,
        }
    }

    /// Adds a new evidence record.
    ///
    /// Every pre-attached artifact ID is validated before anything is
    /// stored: the artifact must exist and must belong to the evidence's
    /// run.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateEvidence` on an ID collision,
    /// `RegistryError::ArtifactNotFound` for an unknown pre-attached
    /// artifact, or `RegistryError::RunMismatch` when an attached
    /// artifact's run differs from the evidence's run. The registry is left
    /// unchanged on every error.
    pub fn add_evidence(&mut self, mut evidence: Evidence) -> Result<(), RegistryError> {
        if self.evidence_positions.contains_key(&evidence.evidence_id) {
            return Err(RegistryError::DuplicateEvidence {
                evidence_id: evidence.evidence_id,
            });
        }
        for artifact_id in &evidence.artifact_ids {
            self.check_run_alignment(&evidence.evidence_id, &evidence.run_id, artifact_id)?;
        }

        // Keep the attachment list free of duplicates.
        let mut seen = Vec::with_capacity(evidence.artifact_ids.len());
        for artifact_id in evidence.artifact_ids {
            if !seen.contains(&artifact_id) {
                seen.push(artifact_id);
            }
        }
        evidence.artifact_ids = seen;

        debug!(
            evidence_id = %evidence.evidence_id,
            run_id = %evidence.run_id,
            category = %evidence.category,
            "evidence added"
        );
        self.evidence.push(evidence);
        self.rebuild_indexes();
        Ok(())
    }

    /// Returns the evidence record with the given ID, if present.
    #[must_use]
    pub fn get_evidence(&self, evidence_id: &str) -> Option<&Evidence> {
        self.evidence_positions
            .get(evidence_id)
            .map(|&position| &self.evidence[position])
    }

    /// Returns all evidence records for a run, in insertion order.
    #[must_use]
    pub fn evidence_by_run(&self, run_id: &str) -> Vec<&Evidence> {
        self.evidence_by_run
            .get(run_id)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.evidence[position])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Attaches an artifact to an evidence record.
    ///
    /// Attachment is idempotent: attaching an already-attached artifact
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::EvidenceNotFound` or
    /// `RegistryError::ArtifactNotFound` for unknown IDs, and
    /// `RegistryError::RunMismatch` when the artifact belongs to a
    /// different run than the evidence.
    pub fn attach_artifact_to_evidence(
        &mut self,
        evidence_id: &str,
        artifact_id: &str,
    ) -> Result<(), RegistryError> {
        let Some(&position) = self.evidence_positions.get(evidence_id) else {
            return Err(RegistryError::EvidenceNotFound {
                evidence_id: evidence_id.to_string(),
            });
        };
        let run_id = self.evidence[position].run_id.clone();
        self.check_run_alignment(evidence_id, &run_id, artifact_id)?;

        let entry = &mut self.evidence[position];
        if !entry.artifact_ids.iter().any(|id| id == artifact_id) {
            entry.artifact_ids.push(artifact_id.to_string());
        }
        Ok(())
    }

    /// Updates the status of an evidence record.
    ///
    /// Status is the only evidence field besides the attachment list that
    /// may change after insertion.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::EvidenceNotFound` for an unknown ID.
    pub fn update_evidence_status(
        &mut self,
        evidence_id: &str,
        status: EvidenceStatus,
    ) -> Result<(), RegistryError> {
        let Some(&position) = self.evidence_positions.get(evidence_id) else {
            return Err(RegistryError::EvidenceNotFound {
                evidence_id: evidence_id.to_string(),
            });
        };
        self.evidence[position].status = status;
        Ok(())
    }

    /// Returns whether the run has at least one evidence record in every
    /// category and the most recent record per category is not failed.
    ///
    /// "Most recent" is by creation timestamp; equal timestamps are broken
    /// by insertion order, last-inserted wins.
    #[must_use]
    pub fn is_fully_documented(&self, run_id: &str) -> bool {
        let entries = self.evidence_by_run(run_id);
        EvidenceCategory::all().iter().all(|category| {
            let mut latest: Option<&Evidence> = None;
            for entry in &entries {
                if entry.category != *category {
                    continue;
                }
                match latest {
                    Some(current) if entry.created_at < current.created_at => {},
                    _ => latest = Some(entry),
                }
            }
            latest.is_some_and(|entry| entry.status != EvidenceStatus::Failed)
        })
    }

    /// Builds the chronological timeline of evidence and artifact events
    /// for a run.
    ///
    /// Events are ordered by ascending timestamp; the sort is stable, so
    /// equal timestamps keep insertion order with evidence events ahead of
    /// artifact events.
    #[must_use]
    pub fn build_timeline(&self, run_id: &str) -> Vec<TimelineEvent> {
        let mut events: Vec<TimelineEvent> = self
            .evidence_by_run(run_id)
            .into_iter()
            .map(|entry| TimelineEvent::Evidence {
                id: entry.evidence_id.clone(),
                category: entry.category,
                status: entry.status,
                created_at: entry.created_at,
            })
            .collect();
        events.extend(self.artifacts_by_run(run_id).into_iter().map(|artifact| {
            TimelineEvent::Artifact {
                id: artifact.artifact_id.clone(),
                kind: artifact.kind,
                location: artifact.location(),
                created_at: artifact.created_at,
            }
        }));
        events.sort_by_key(TimelineEvent::created_at);
        events
    }

    /// Validates that an artifact exists and belongs to the evidence's run.
    fn check_run_alignment(
        &self,
        evidence_id: &str,
        evidence_run_id: &str,
        artifact_id: &str,
    ) -> Result<(), RegistryError> {
        let Some(artifact) = self.get_artifact(artifact_id) else {
            return Err(RegistryError::ArtifactNotFound {
                artifact_id: artifact_id.to_string(),
            });
        };
        if artifact.run_id != evidence_run_id {
            return Err(RegistryError::RunMismatch {
                evidence_id: evidence_id.to_string(),
                evidence_run_id: evidence_run_id.to_string(),
                artifact_id: artifact_id.to_string(),
                artifact_run_id: artifact.run_id.clone(),
            });
        }
        Ok(())
    }

    /// Rebuilds every index projection from the canonical lists.
    fn rebuild_indexes(&mut self) {
        self.artifact_positions.clear();
        self.evidence_positions.clear();
        self.artifacts_by_run.clear();
        self.artifacts_by_pr.clear();
        self.artifacts_by_kind.clear();
        self.evidence_by_run.clear();

        for (position, artifact) in self.artifacts.iter().enumerate() {
            self.artifact_positions
                .insert(artifact.artifact_id.clone(), position);
            self.artifacts_by_run
                .entry(artifact.run_id.clone())
                .or_default()
                .push(position);
            if let Some(pr_number) = artifact.pr_number {
                self.artifacts_by_pr
                    .entry(pr_number)
                    .or_default()
                    .push(position);
            }
            self.artifacts_by_kind
                .entry(artifact.kind)
                .or_default()
                .push(position);
        }

        for (position, entry) in self.evidence.iter().enumerate() {
            self.evidence_positions
                .insert(entry.evidence_id.clone(), position);
            self.evidence_by_run
                .entry(entry.run_id.clone())
                .or_default()
                .push(position);
        }
    }
}
