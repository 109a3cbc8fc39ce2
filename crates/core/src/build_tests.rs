// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn build_with_logs(logs: serde_json::Value) -> Build {
    serde_json::from_value(json!({
        "id": "test:4c2d7e0a",
        "projectName": "test",
        "logs": logs,
    }))
    .unwrap()
}

#[test]
fn deserializes_codebuild_response_shape() {
    let build: Build = serde_json::from_value(json!({
        "id": "app:1234",
        "arn": "arn:aws:codebuild:us-east-1:000000000000:build/app:1234",
        "buildNumber": 42,
        "startTime": 1700000000.5,
        "currentPhase": "PRE_BUILD",
        "buildStatus": "IN_PROGRESS",
        "initiator": "github-actions",
        "timeoutInMinutes": 60,
        "phases": [
            { "phaseType": "SUBMITTED", "phaseStatus": "SUCCEEDED", "durationInSeconds": 0 },
            { "phaseType": "PRE_BUILD" }
        ],
        "buildComplete": false
    }))
    .unwrap();

    assert_eq!(build.current_phase, Some(BuildPhase::PreBuild));
    assert_eq!(build.status(), BuildStatus::InProgress);
    assert_eq!(build.build_number, Some(42));
    assert_eq!(build.phases.len(), 2);
    assert_eq!(build.project(), "app");
    assert_eq!(
        build.started_at().map(|t| t.timestamp_millis()),
        Some(1_700_000_000_500)
    );
    assert!(build.ended_at().is_none());
}

#[test]
fn missing_status_counts_as_in_progress() {
    let build = Build {
        id: "p:1".into(),
        ..Build::default()
    };
    assert_eq!(build.status(), BuildStatus::InProgress);
}

#[test]
fn log_target_defaults_group_and_stream() {
    let build = build_with_logs(json!({ "cloudWatchLogs": { "status": "ENABLED" } }));
    let target = build.log_target().unwrap();
    assert_eq!(target.group, "/aws/codebuild/test");
    assert_eq!(target.stream, "4c2d7e0a");
}

#[test]
fn log_target_uses_configured_prefix() {
    let build = build_with_logs(json!({
        "cloudWatchLogs": { "status": "ENABLED", "groupName": "ci", "streamName": "runs" }
    }));
    let target = build.log_target().unwrap();
    assert_eq!(target.group, "ci");
    assert_eq!(target.stream, "runs/4c2d7e0a");
}

#[test]
fn log_target_prefers_resolved_names() {
    let build = build_with_logs(json!({
        "groupName": "/aws/codebuild/test",
        "streamName": "resolved-stream",
        "cloudWatchLogs": { "status": "ENABLED", "streamName": "runs" }
    }));
    assert_eq!(build.log_target().unwrap().stream, "resolved-stream");
}

#[test]
fn disabled_or_missing_cloudwatch_has_no_target() {
    let disabled = build_with_logs(json!({ "cloudWatchLogs": { "status": "DISABLED" } }));
    assert!(disabled.log_target().is_none());

    let absent = build_with_logs(json!({ "s3Logs": { "status": "ENABLED" } }));
    assert!(absent.log_target().is_none());

    let no_logs = Build {
        id: "test:1".into(),
        ..Build::default()
    };
    assert!(no_logs.log_target().is_none());
}

#[test]
fn batch_log_target_follows_log_config() {
    let batch: BuildBatch = serde_json::from_value(json!({
        "id": "test:batch-1",
        "buildBatchStatus": "SUCCEEDED",
        "currentPhase": "SUCCEEDED",
        "logConfig": { "cloudWatchLogs": { "status": "ENABLED" } }
    }))
    .unwrap();

    assert_eq!(batch.status(), BuildStatus::Succeeded);
    let target = batch.log_target().unwrap();
    assert_eq!(target.group, "/aws/codebuild/test");
    assert_eq!(target.stream, "batch-1");
}

#[test]
fn run_id_takes_suffix_after_last_colon() {
    assert_eq!(run_id("project:abc"), "abc");
    assert_eq!(run_id("plain"), "plain");
}
