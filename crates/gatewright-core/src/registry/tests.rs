//! Tests for the evidence and artifact registry.

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::*;

fn link_artifact(artifact_id: &str, run_id: &str) -> Artifact {
    Artifact::new(
        artifact_id,
        run_id,
        ArtifactKind::CiEvidence,
        ArtifactStorage::ExternalLink {
            url: format!("https://ci.example/{artifact_id}"),
        },
        format!("artifact {artifact_id}"),
        "ci-bot",
    )
}

fn evidence_entry(evidence_id: &str, run_id: &str, category: EvidenceCategory) -> Evidence {
    Evidence::new(
        evidence_id,
        run_id,
        category,
        "webhook-watcher",
        format!("evidence {evidence_id}"),
    )
    .with_status(EvidenceStatus::Passed)
}

/// Adds one passed evidence record per required category for the run.
fn fully_document(registry: &mut Registry, run_id: &str) {
    for (i, category) in EvidenceCategory::all().iter().enumerate() {
        registry
            .add_evidence(evidence_entry(&format!("ev-{run_id}-{i}"), run_id, *category))
            .unwrap();
    }
}

#[test]
fn test_register_and_get_artifact() {
    let mut registry = Registry::new("registry-001");
    let id = registry
        .register_artifact(link_artifact("art-001", "run-123"))
        .unwrap();
    assert_eq!(id, "art-001");
    assert_eq!(registry.artifact_count(), 1);

    let artifact = registry.get_artifact("art-001").unwrap();
    assert_eq!(artifact.run_id, "run-123");
    assert_eq!(artifact.kind, ArtifactKind::CiEvidence);
    assert!(artifact.is_accessible());
}

#[test]
fn test_register_duplicate_artifact_fails() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-001", "run-123"))
        .unwrap();
    let err = registry
        .register_artifact(link_artifact("art-001", "run-456"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateArtifact { artifact_id } if artifact_id == "art-001"
    ));
    // No partial mutation.
    assert_eq!(registry.artifact_count(), 1);
    assert_eq!(registry.get_artifact("art-001").unwrap().run_id, "run-123");
}

#[test]
fn test_get_unknown_artifact_is_none() {
    let registry = Registry::new("registry-001");
    assert!(registry.get_artifact("art-missing").is_none());
    assert!(registry.get_evidence("ev-missing").is_none());
}

#[test]
fn test_artifacts_by_run_filters_and_preserves_order() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-2", "run-123"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-other", "run-456"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-3", "run-123"))
        .unwrap();

    let artifacts = registry.artifacts_by_run("run-123");
    let ids: Vec<&str> = artifacts
        .iter()
        .map(|artifact| artifact.artifact_id.as_str())
        .collect();
    assert_eq!(ids, vec!["art-1", "art-2", "art-3"]);
    assert_eq!(registry.artifacts_by_run("run-456").len(), 1);
    assert!(registry.artifacts_by_run("run-789").is_empty());
}

#[test]
fn test_artifacts_by_pr_and_kind() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123").with_pr_number(42))
        .unwrap();
    registry
        .register_artifact(
            Artifact::new(
                "art-2",
                "run-123",
                ArtifactKind::Report,
                ArtifactStorage::LocalFile {
                    path: "/tmp/report.md".to_string(),
                },
                "post-run report",
                "learning-gate",
            )
            .with_pr_number(42),
        )
        .unwrap();
    registry
        .register_artifact(link_artifact("art-3", "run-456").with_pr_number(7))
        .unwrap();

    assert_eq!(registry.artifacts_by_pr(42).len(), 2);
    assert_eq!(registry.artifacts_by_pr(7).len(), 1);
    assert!(registry.artifacts_by_pr(999).is_empty());

    let reports = registry.artifacts_by_kind(ArtifactKind::Report);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].artifact_id, "art-2");
}

#[test]
fn test_delete_artifact_rebuilds_indexes() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-2", "run-123"))
        .unwrap();

    assert!(registry.delete_artifact("art-1"));
    assert!(!registry.delete_artifact("art-1"));
    assert_eq!(registry.artifact_count(), 1);
    assert!(registry.get_artifact("art-1").is_none());

    let remaining = registry.artifacts_by_run("run-123");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].artifact_id, "art-2");
    assert_eq!(
        registry.artifacts_by_kind(ArtifactKind::CiEvidence).len(),
        1
    );
}

#[test]
fn test_run_summary_counts_kinds() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-2", "run-123"))
        .unwrap();
    registry
        .register_artifact(
            Artifact::new(
                "art-3",
                "run-123",
                ArtifactKind::LessonsLearned,
                ArtifactStorage::InlineJson {
                    content: json!({"lesson": "pin the toolchain"}),
                },
                "lessons learned",
                "learning-gate",
            ),
        )
        .unwrap();
    registry
        .register_artifact(link_artifact("art-other", "run-456"))
        .unwrap();

    let summary = registry.run_summary("run-123");
    assert_eq!(summary.run_id, "run-123");
    assert_eq!(summary.total_artifacts, 3);
    assert_eq!(summary.artifacts_by_kind[&ArtifactKind::CiEvidence], 2);
    assert_eq!(summary.artifacts_by_kind[&ArtifactKind::LessonsLearned], 1);
    assert_eq!(summary.artifacts.len(), 3);
    assert_eq!(summary.artifacts[2].location, "inline://art-3");
}

#[test]
fn test_add_evidence_rejects_duplicate_id() {
    let mut registry = Registry::new("registry-001");
    registry
        .add_evidence(evidence_entry("ev-1", "run-123", EvidenceCategory::Pr))
        .unwrap();
    let err = registry
        .add_evidence(evidence_entry("ev-1", "run-123", EvidenceCategory::Ci))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateEvidence { .. }));
    assert_eq!(registry.evidence_count(), 1);
}

#[test]
fn test_add_evidence_validates_preattached_artifacts() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-456"))
        .unwrap();

    let err = registry
        .add_evidence(
            evidence_entry("ev-1", "run-123", EvidenceCategory::Ci)
                .with_artifact_ids(vec!["art-missing".to_string()]),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::ArtifactNotFound { .. }));

    let err = registry
        .add_evidence(
            evidence_entry("ev-1", "run-123", EvidenceCategory::Ci)
                .with_artifact_ids(vec!["art-1".to_string()]),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::RunMismatch { .. }));
    // Both rejections left the registry unchanged.
    assert_eq!(registry.evidence_count(), 0);
}

#[test]
fn test_attach_artifact_to_evidence() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123"))
        .unwrap();
    registry
        .add_evidence(evidence_entry("ev-1", "run-123", EvidenceCategory::Ci))
        .unwrap();

    registry
        .attach_artifact_to_evidence("ev-1", "art-1")
        .unwrap();
    // Idempotent: attaching again does not duplicate.
    registry
        .attach_artifact_to_evidence("ev-1", "art-1")
        .unwrap();

    let evidence = registry.get_evidence("ev-1").unwrap();
    assert_eq!(evidence.artifact_ids, vec!["art-1".to_string()]);
}

#[test]
fn test_attach_rejects_unknown_ids_and_run_mismatch() {
    let mut registry = Registry::new("registry-001");
    registry
        .register_artifact(link_artifact("art-1", "run-123"))
        .unwrap();
    registry
        .register_artifact(link_artifact("art-other", "run-456"))
        .unwrap();
    registry
        .add_evidence(evidence_entry("ev-1", "run-123", EvidenceCategory::Ci))
        .unwrap();

    assert!(matches!(
        registry.attach_artifact_to_evidence("ev-missing", "art-1"),
        Err(RegistryError::EvidenceNotFound { .. })
    ));
    assert!(matches!(
        registry.attach_artifact_to_evidence("ev-1", "art-missing"),
        Err(RegistryError::ArtifactNotFound { .. })
    ));
    assert!(matches!(
        registry.attach_artifact_to_evidence("ev-1", "art-other"),
        Err(RegistryError::RunMismatch { .. })
    ));
    assert!(registry.get_evidence("ev-1").unwrap().artifact_ids.is_empty());
}

#[test]
fn test_update_evidence_status() {
    let mut registry = Registry::new("registry-001");
    registry
        .add_evidence(evidence_entry("ev-1", "run-123", EvidenceCategory::Ci))
        .unwrap();
    registry
        .update_evidence_status("ev-1", EvidenceStatus::Failed)
        .unwrap();
    assert_eq!(
        registry.get_evidence("ev-1").unwrap().status,
        EvidenceStatus::Failed
    );
    assert!(matches!(
        registry.update_evidence_status("ev-missing", EvidenceStatus::Passed),
        Err(RegistryError::EvidenceNotFound { .. })
    ));
}

#[test]
fn test_is_fully_documented_requires_every_category() {
    let mut registry = Registry::new("registry-001");
    assert!(!registry.is_fully_documented("run-123"));

    registry
        .add_evidence(evidence_entry("ev-pr", "run-123", EvidenceCategory::Pr))
        .unwrap();
    registry
        .add_evidence(evidence_entry("ev-ci", "run-123", EvidenceCategory::Ci))
        .unwrap();
    registry
        .add_evidence(evidence_entry(
            "ev-deploy",
            "run-123",
            EvidenceCategory::Deploy,
        ))
        .unwrap();
    assert!(!registry.is_fully_documented("run-123"));

    registry
        .add_evidence(evidence_entry(
            "ev-verify",
            "run-123",
            EvidenceCategory::Verify,
        ))
        .unwrap();
    assert!(registry.is_fully_documented("run-123"));
}

#[test]
fn test_is_fully_documented_uses_most_recent_entry() {
    let mut registry = Registry::new("registry-001");
    fully_document(&mut registry, "run-123");
    assert!(registry.is_fully_documented("run-123"));

    // A newer failed CI entry flips the run back to undocumented.
    let mut failed = evidence_entry("ev-ci-retry", "run-123", EvidenceCategory::Ci)
        .with_status(EvidenceStatus::Failed);
    failed.created_at = Utc::now() + chrono::Duration::seconds(5);
    registry.add_evidence(failed).unwrap();
    assert!(!registry.is_fully_documented("run-123"));

    // An even newer passed entry restores it.
    let mut passed = evidence_entry("ev-ci-fixed", "run-123", EvidenceCategory::Ci);
    passed.created_at = Utc::now() + chrono::Duration::seconds(10);
    registry.add_evidence(passed).unwrap();
    assert!(registry.is_fully_documented("run-123"));
}

#[test]
fn test_fully_documented_timestamp_tie_breaks_by_insertion_order() {
    // Relative to now so the tie entries are always newer than the
    // baseline entries stamped by `fully_document`.
    let timestamp = Utc::now() + chrono::Duration::seconds(60);
    let mut registry = Registry::new("registry-001");
    fully_document(&mut registry, "run-123");

    let mut failed = evidence_entry("ev-tie-failed", "run-123", EvidenceCategory::Verify)
        .with_status(EvidenceStatus::Failed);
    failed.created_at = timestamp;
    let mut passed = evidence_entry("ev-tie-passed", "run-123", EvidenceCategory::Verify);
    passed.created_at = timestamp;

    // Same timestamp: last-inserted wins, so the passed entry is "most
    // recent" and the run stays documented.
    registry.add_evidence(failed).unwrap();
    registry.add_evidence(passed).unwrap();
    assert!(registry.is_fully_documented("run-123"));

    // Reversed insertion order flips the outcome.
    let mut registry = Registry::new("registry-002");
    fully_document(&mut registry, "run-123");
    let mut passed = evidence_entry("ev-tie-passed", "run-123", EvidenceCategory::Verify);
    passed.created_at = timestamp;
    let mut failed = evidence_entry("ev-tie-failed", "run-123", EvidenceCategory::Verify)
        .with_status(EvidenceStatus::Failed);
    failed.created_at = timestamp;
    registry.add_evidence(passed).unwrap();
    registry.add_evidence(failed).unwrap();
    assert!(!registry.is_fully_documented("run-123"));
}

#[test]
fn test_build_timeline_orders_by_timestamp() {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let mut registry = Registry::new("registry-001");

    let mut artifact = link_artifact("art-1", "run-123");
    artifact.created_at = base + chrono::Duration::seconds(30);
    registry.register_artifact(artifact).unwrap();

    let mut first = evidence_entry("ev-1", "run-123", EvidenceCategory::Pr);
    first.created_at = base;
    registry.add_evidence(first).unwrap();

    let mut last = evidence_entry("ev-2", "run-123", EvidenceCategory::Ci);
    last.created_at = base + chrono::Duration::seconds(60);
    registry.add_evidence(last).unwrap();

    let timeline = registry.build_timeline("run-123");
    assert_eq!(timeline.len(), 3);
    assert!(matches!(&timeline[0], TimelineEvent::Evidence { id, .. } if id == "ev-1"));
    assert!(matches!(&timeline[1], TimelineEvent::Artifact { id, .. } if id == "art-1"));
    assert!(matches!(&timeline[2], TimelineEvent::Evidence { id, .. } if id == "ev-2"));
    assert!(timeline
        .windows(2)
        .all(|pair| pair[0].created_at() <= pair[1].created_at()));
}

#[test]
fn test_build_timeline_tie_break_is_deterministic() {
    let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    let mut registry = Registry::new("registry-001");

    let mut artifact = link_artifact("art-1", "run-123");
    artifact.created_at = timestamp;
    registry.register_artifact(artifact).unwrap();
    let mut entry = evidence_entry("ev-1", "run-123", EvidenceCategory::Pr);
    entry.created_at = timestamp;
    registry.add_evidence(entry).unwrap();

    // Stable sort: evidence events precede artifact events on equal
    // timestamps, every time.
    for _ in 0..3 {
        let timeline = registry.build_timeline("run-123");
        assert!(matches!(&timeline[0], TimelineEvent::Evidence { .. }));
        assert!(matches!(&timeline[1], TimelineEvent::Artifact { .. }));
    }
}

#[test]
fn test_registry_serde_roundtrip_rebuilds_indexes() {
    let mut registry = Registry::with_generated_id();
    registry
        .register_artifact(link_artifact("art-1", "run-123").with_pr_number(42))
        .unwrap();
    registry
        .add_evidence(
            evidence_entry("ev-1", "run-123", EvidenceCategory::Ci)
                .with_artifact_ids(vec!["art-1".to_string()]),
        )
        .unwrap();

    let json = serde_json::to_string(&registry).unwrap();
    let parsed: Registry = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.registry_id(), registry.registry_id());
    assert_eq!(parsed.artifact_count(), 1);
    assert_eq!(parsed.artifacts_by_run("run-123").len(), 1);
    assert_eq!(parsed.artifacts_by_pr(42).len(), 1);
    assert_eq!(
        parsed.artifacts_by_kind(ArtifactKind::CiEvidence).len(),
        1
    );
    assert_eq!(parsed.evidence_by_run("run-123").len(), 1);
    assert_eq!(
        parsed.get_evidence("ev-1").unwrap().artifact_ids,
        vec!["art-1".to_string()]
    );
}

#[test]
fn test_artifact_kind_roundtrip() {
    for kind in [
        ArtifactKind::EvidenceChain,
        ArtifactKind::GateEvidence,
        ArtifactKind::KnowledgeBundle,
        ArtifactKind::ConfigSnapshot,
    ] {
        assert_eq!(ArtifactKind::parse(kind.as_str()).unwrap(), kind);
    }
    assert_eq!(
        ArtifactKind::parse("lessons_learned").unwrap(),
        ArtifactKind::LessonsLearned
    );
    assert!(matches!(
        ArtifactKind::parse("hologram"),
        Err(RegistryError::InvalidKind { .. })
    ));
}

#[test]
fn test_evidence_category_roundtrip() {
    for category in EvidenceCategory::all() {
        assert_eq!(
            EvidenceCategory::parse(category.as_str()).unwrap(),
            *category
        );
    }
    assert!(matches!(
        EvidenceCategory::parse("rollback"),
        Err(RegistryError::InvalidCategory { .. })
    ));
}

#[test]
fn test_inline_artifact_location_and_accessibility() {
    let inline = Artifact::new(
        "art-inline",
        "run-123",
        ArtifactKind::EvidenceChain,
        ArtifactStorage::InlineJson {
            content: json!({"gates": 6}),
        },
        "evidence chain",
        "gate-framework",
    );
    assert_eq!(inline.location(), "inline://art-inline");
    assert_eq!(inline.content_type, "application/json");
    assert!(inline.is_accessible());

    let empty = Artifact::new(
        "art-null",
        "run-123",
        ArtifactKind::EvidenceChain,
        ArtifactStorage::InlineJson {
            content: serde_json::Value::Null,
        },
        "empty chain",
        "gate-framework",
    );
    assert!(!empty.is_accessible());
}

#[test]
fn test_artifact_storage_serde_tags() {
    let artifact = link_artifact("art-1", "run-123");
    let json = serde_json::to_string(&artifact).unwrap();
    assert!(json.contains("\"storage_type\":\"external_link\""));
    let parsed: Artifact = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, artifact);
}
