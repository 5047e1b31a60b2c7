//! Artifact records: references to stored proof content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Kind classification for artifacts in the registry.
///
/// Kinds determine how artifacts are organized and indexed. They cover the
/// evidence chain produced by gate runs, the knowledge outputs of the
/// learning gate, and general supporting material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ArtifactKind {
    /// Complete evidence chain for a run.
    EvidenceChain,

    /// Evidence captured from the PR itself.
    PrEvidence,

    /// Evidence captured from CI execution.
    CiEvidence,

    /// Evidence captured from a deployment.
    DeployEvidence,

    /// Evidence captured from post-deploy verification.
    VerifyEvidence,

    /// Evidence captured from a gate evaluation.
    GateEvidence,

    /// Feature summary produced by the learning gate.
    FeatureSummary,

    /// Lessons-learned write-up.
    LessonsLearned,

    /// Identified gaps in test coverage.
    TestGaps,

    /// Deployment notes.
    DeployNotes,

    /// Bundle of knowledge artifacts.
    KnowledgeBundle,

    /// Raw log file.
    LogFile,

    /// Screenshot.
    Screenshot,

    /// Generated report.
    Report,

    /// Configuration snapshot.
    ConfigSnapshot,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ArtifactKind {
    /// Parses an artifact kind from a string.
    ///
    /// Accepts both `SCREAMING_SNAKE_CASE` (canonical) and `snake_case`
    /// forms.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidKind` if the string is not a
    /// recognized kind.
    pub fn parse(s: &str) -> Result<Self, RegistryError> {
        match s.to_uppercase().as_str() {
            "EVIDENCE_CHAIN" => Ok(Self::EvidenceChain),
            "PR_EVIDENCE" => Ok(Self::PrEvidence),
            "CI_EVIDENCE" => Ok(Self::CiEvidence),
            "DEPLOY_EVIDENCE" => Ok(Self::DeployEvidence),
            "VERIFY_EVIDENCE" => Ok(Self::VerifyEvidence),
            "GATE_EVIDENCE" => Ok(Self::GateEvidence),
            "FEATURE_SUMMARY" => Ok(Self::FeatureSummary),
            "LESSONS_LEARNED" => Ok(Self::LessonsLearned),
            "TEST_GAPS" => Ok(Self::TestGaps),
            "DEPLOY_NOTES" => Ok(Self::DeployNotes),
            "KNOWLEDGE_BUNDLE" => Ok(Self::KnowledgeBundle),
            "LOG_FILE" => Ok(Self::LogFile),
            "SCREENSHOT" => Ok(Self::Screenshot),
            "REPORT" => Ok(Self::Report),
            "CONFIG_SNAPSHOT" => Ok(Self::ConfigSnapshot),
            _ => Err(RegistryError::InvalidKind {
                value: s.to_string(),
            }),
        }
    }

    /// Returns the canonical string representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EvidenceChain => "EVIDENCE_CHAIN",
            Self::PrEvidence => "PR_EVIDENCE",
            Self::CiEvidence => "CI_EVIDENCE",
            Self::DeployEvidence => "DEPLOY_EVIDENCE",
            Self::VerifyEvidence => "VERIFY_EVIDENCE",
            Self::GateEvidence => "GATE_EVIDENCE",
            Self::FeatureSummary => "FEATURE_SUMMARY",
            Self::LessonsLearned => "LESSONS_LEARNED",
            Self::TestGaps => "TEST_GAPS",
            Self::DeployNotes => "DEPLOY_NOTES",
            Self::KnowledgeBundle => "KNOWLEDGE_BUNDLE",
            Self::LogFile => "LOG_FILE",
            Self::Screenshot => "SCREENSHOT",
            Self::Report => "REPORT",
            Self::ConfigSnapshot => "CONFIG_SNAPSHOT",
        }
    }
}

/// Where an artifact's content lives.
///
/// The variant carries the location itself, so a storage value is always
/// complete: there is no separate storage-type tag to keep in sync with a
/// location string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "storage_type", rename_all = "snake_case")]
pub enum ArtifactStorage {
    /// A file on the local filesystem.
    LocalFile {
        /// Path to the file.
        path: String,
    },

    /// A file stored remotely.
    RemoteFile {
        /// URL of the file.
        url: String,
    },

    /// Structured content stored inline in the registry.
    InlineJson {
        /// The inline JSON payload.
        content: serde_json::Value,
    },

    /// A link to an external system.
    ExternalLink {
        /// The external URL.
        url: String,
    },

    /// An artifact held by GitHub (workflow artifact, release asset).
    GithubArtifact {
        /// URL of the GitHub artifact.
        url: String,
    },
}

impl ArtifactStorage {
    /// Returns the default MIME type for content in this storage.
    #[must_use]
    pub const fn default_content_type(&self) -> &'static str {
        match self {
            Self::InlineJson { .. } => "application/json",
            Self::LocalFile { .. } | Self::RemoteFile { .. } => "application/octet-stream",
            Self::ExternalLink { .. } | Self::GithubArtifact { .. } => "text/uri-list",
        }
    }
}

/// A reference to stored proof content tied to exactly one run.
///
/// Artifacts are immutable after registration; the only permitted change is
/// removal from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique identifier for this artifact.
    pub artifact_id: String,

    /// The run this artifact belongs to.
    pub run_id: String,

    /// Related PR number, if any.
    #[serde(default)]
    pub pr_number: Option<u64>,

    /// Kind classification.
    pub kind: ArtifactKind,

    /// Where the content lives.
    pub storage: ArtifactStorage,

    /// Human-readable name.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Who or what created this artifact.
    pub created_by: String,

    /// When this artifact was created.
    pub created_at: DateTime<Utc>,

    /// MIME type of the content.
    pub content_type: String,

    /// Optional SHA-256 checksum of the content.
    #[serde(default)]
    pub checksum: Option<String>,

    /// Optional content size in bytes.
    #[serde(default)]
    pub size_bytes: Option<u64>,

    /// Tags for categorization.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Optional retention period in days.
    #[serde(default)]
    pub retention_days: Option<u32>,
}

impl Artifact {
    /// Creates an artifact with the required fields.
    ///
    /// The content type defaults from the storage variant; optional fields
    /// are set with the `with_*` methods.
    #[must_use]
    pub fn new(
        artifact_id: impl Into<String>,
        run_id: impl Into<String>,
        kind: ArtifactKind,
        storage: ArtifactStorage,
        name: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let content_type = storage.default_content_type().to_string();
        Self {
            artifact_id: artifact_id.into(),
            run_id: run_id.into(),
            pr_number: None,
            kind,
            storage,
            name: name.into(),
            description: None,
            created_by: created_by.into(),
            created_at: Utc::now(),
            content_type,
            checksum: None,
            size_bytes: None,
            tags: Vec::new(),
            retention_days: None,
        }
    }

    /// Sets the related PR number.
    #[must_use]
    pub fn with_pr_number(mut self, pr_number: u64) -> Self {
        self.pr_number = Some(pr_number);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the MIME type, overriding the storage default.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the content checksum.
    #[must_use]
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    /// Sets the content size.
    #[must_use]
    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    /// Sets the categorization tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the retention period.
    #[must_use]
    pub fn with_retention_days(mut self, retention_days: u32) -> Self {
        self.retention_days = Some(retention_days);
        self
    }

    /// Returns the path or URL to access this artifact.
    ///
    /// Inline artifacts are addressed as `inline://<artifact_id>`.
    #[must_use]
    pub fn location(&self) -> String {
        match &self.storage {
            ArtifactStorage::LocalFile { path } => path.clone(),
            ArtifactStorage::RemoteFile { url }
            | ArtifactStorage::ExternalLink { url }
            | ArtifactStorage::GithubArtifact { url } => url.clone(),
            ArtifactStorage::InlineJson { .. } => format!("inline://{}", self.artifact_id),
        }
    }

    /// Returns whether the artifact appears accessible (basic validation).
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        match &self.storage {
            ArtifactStorage::LocalFile { path } => !path.is_empty(),
            ArtifactStorage::RemoteFile { url }
            | ArtifactStorage::ExternalLink { url }
            | ArtifactStorage::GithubArtifact { url } => !url.is_empty(),
            ArtifactStorage::InlineJson { content } => !content.is_null(),
        }
    }
}
