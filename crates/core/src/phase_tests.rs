// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    submitted = { BuildPhase::Submitted, false },
    queued = { BuildPhase::Queued, false },
    provisioning = { BuildPhase::Provisioning, false },
    download_source = { BuildPhase::DownloadSource, true },
    build = { BuildPhase::Build, true },
    completed = { BuildPhase::Completed, true },
    unknown = { BuildPhase::Unknown, true },
)]
fn build_phase_log_availability(phase: BuildPhase, has_logs: bool) {
    assert_eq!(phase.has_logs(), has_logs);
}

#[parameterized(
    submitted = { BatchPhase::Submitted, false, false },
    download_batchspec = { BatchPhase::DownloadBatchspec, false, false },
    in_progress = { BatchPhase::InProgress, true, false },
    succeeded = { BatchPhase::Succeeded, true, true },
    failed = { BatchPhase::Failed, true, true },
    stopped = { BatchPhase::Stopped, true, true },
)]
fn batch_phase_vocabulary(phase: BatchPhase, has_logs: bool, terminal: bool) {
    assert_eq!(phase.has_logs(), has_logs);
    assert_eq!(phase.is_terminal(), terminal);
}

#[test]
fn only_completed_is_terminal_for_single_builds() {
    let terminal: Vec<_> = BuildPhase::ALL
        .iter()
        .filter(|p| p.is_terminal())
        .collect();
    assert_eq!(terminal, vec![&BuildPhase::Completed]);
}

#[test]
fn phases_parse_from_wire_names() {
    for phase in BuildPhase::ALL {
        assert_eq!(phase.as_str().parse::<BuildPhase>(), Ok(*phase));
    }
    for phase in BatchPhase::ALL {
        assert_eq!(phase.as_str().parse::<BatchPhase>(), Ok(*phase));
    }
    assert!("NOPE".parse::<BuildPhase>().is_err());
}

#[test]
fn serde_uses_wire_names_and_tolerates_new_phases() {
    let phase: BuildPhase = serde_json::from_str("\"UPLOAD_ARTIFACTS\"").unwrap();
    assert_eq!(phase, BuildPhase::UploadArtifacts);

    let phase: BuildPhase = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
    assert_eq!(phase, BuildPhase::Unknown);

    let phase: BatchPhase = serde_json::from_str("\"COMBINE_ARTIFACTS\"").unwrap();
    assert_eq!(phase, BatchPhase::CombineArtifacts);
}

#[test]
fn tracker_reports_each_distinct_phase_once() {
    let mut tracker = PhaseTracker::new();
    let reports = [
        BuildPhase::Queued,
        BuildPhase::Queued,
        BuildPhase::Provisioning,
        BuildPhase::Provisioning,
        BuildPhase::Provisioning,
        BuildPhase::Build,
        BuildPhase::Build,
        BuildPhase::Completed,
        BuildPhase::Completed,
    ];

    let changes: Vec<_> = reports
        .into_iter()
        .filter_map(|p| tracker.observe(p))
        .collect();

    assert_eq!(changes.len(), 4);
    assert_eq!(changes[0].previous, PhaseState::Starting);
    assert_eq!(changes[0].current, BuildPhase::Queued);
    assert_eq!(
        changes[3].previous,
        PhaseState::Phase(BuildPhase::Build)
    );
    assert!(tracker.current().is_terminal());
}

#[test]
fn phase_state_display() {
    assert_eq!(PhaseState::<BuildPhase>::Starting.to_string(), "STARTING");
    assert_eq!(
        PhaseState::Phase(BuildPhase::PreBuild).to_string(),
        "PRE_BUILD"
    );
}
