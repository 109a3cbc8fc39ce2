// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::build::BuildPhaseRecord;
use crate::phase::BuildPhase;

fn finished(status: BuildStatus) -> Build {
    Build {
        id: "test:testStreamID".into(),
        build_number: Some(7),
        timeout_in_minutes: Some(60),
        initiator: Some("octocat".into()),
        build_status: Some(status),
        current_phase: Some(BuildPhase::Completed),
        phases: vec![BuildPhaseRecord {
            phase_type: Some(BuildPhase::Build),
            phase_status: Some(status),
            duration_in_seconds: Some(12),
        }],
        ..Build::default()
    }
}

fn completed(build: &Build) -> RunOutcome {
    RunOutcome::Completed {
        summary: BuildSummary::from_build(build),
        outputs: BuildOutputs::from_build(build),
    }
}

#[test]
fn output_pairs_cover_every_key() {
    let outputs = BuildOutputs::from_build(&finished(BuildStatus::Succeeded));
    let pairs = outputs.pairs();
    let keys: Vec<_> = pairs.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "id",
            "success",
            "buildNumber",
            "timeoutInMinutes",
            "initiator",
            "buildStatus"
        ]
    );
    assert_eq!(pairs[1].1, "true");
    assert_eq!(pairs[2].1, "7");
    assert_eq!(pairs[5].1, "SUCCEEDED");
}

#[test]
fn missing_output_values_are_empty() {
    let outputs = BuildOutputs::from_build(&Build {
        id: "p:1".into(),
        build_status: Some(BuildStatus::Failed),
        ..Build::default()
    });
    let pairs = outputs.pairs();
    assert_eq!(pairs[2].1, "");
    assert_eq!(pairs[4].1, "");
    assert_eq!(pairs[1].1, "false");
}

#[test]
fn failed_completion_reports_deferred_failure() {
    let outcome = completed(&finished(BuildStatus::Failed));
    assert_eq!(
        outcome.failure().as_deref(),
        Some("Job test:testStreamID was finished with failed status: FAILED")
    );
}

#[test]
fn successful_and_detached_runs_do_not_fail() {
    assert!(completed(&finished(BuildStatus::Succeeded))
        .failure()
        .is_none());
    assert!(RunOutcome::Detached { id: "p:1".into() }.failure().is_none());
    assert!(RunOutcome::Cancelled { id: "p:1".into() }.failure().is_none());
}

#[test]
fn incomplete_run_is_a_failure() {
    let outcome = RunOutcome::Incomplete {
        id: "p:1".into(),
        status: BuildStatus::Stopped,
    };
    assert_eq!(outcome.id(), "p:1");
    assert!(outcome.failure().unwrap().contains("STOPPED"));
}

#[test]
fn summary_copies_phase_rows() {
    let summary = BuildSummary::from_build(&finished(BuildStatus::Succeeded));
    assert_eq!(summary.kind, BuildKind::Single);
    assert_eq!(summary.project, "test");
    assert_eq!(
        summary.phases,
        vec![PhaseRow {
            name: "BUILD".into(),
            status: Some(BuildStatus::Succeeded),
            duration_seconds: Some(12),
        }]
    );
}
