// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal outputs and the final outcome of a run

use crate::build::{Build, BuildBatch};
use crate::status::BuildStatus;
use chrono::{DateTime, Utc};

/// Key/value outputs handed to downstream steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutputs {
    pub id: String,
    pub success: bool,
    pub build_number: Option<i64>,
    pub timeout_in_minutes: Option<i64>,
    pub initiator: Option<String>,
    pub build_status: BuildStatus,
}

impl BuildOutputs {
    pub fn from_build(build: &Build) -> Self {
        Self {
            id: build.id.clone(),
            success: build.status().is_success(),
            build_number: build.build_number,
            timeout_in_minutes: build.timeout_in_minutes,
            initiator: build.initiator.clone(),
            build_status: build.status(),
        }
    }

    pub fn from_batch(batch: &BuildBatch) -> Self {
        Self {
            id: batch.id.clone(),
            success: batch.status().is_success(),
            build_number: batch.build_batch_number,
            timeout_in_minutes: batch.build_timeout_in_minutes,
            initiator: batch.initiator.clone(),
            build_status: batch.status(),
        }
    }

    /// Output pairs in emission order. Missing values become empty strings.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let opt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        vec![
            ("id", self.id.clone()),
            ("success", self.success.to_string()),
            ("buildNumber", opt(self.build_number)),
            ("timeoutInMinutes", opt(self.timeout_in_minutes)),
            ("initiator", self.initiator.clone().unwrap_or_default()),
            ("buildStatus", self.build_status.to_string()),
        ]
    }
}

/// Single build or batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
    Single,
    Batch,
}

/// One row of the phase table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseRow {
    pub name: String,
    pub status: Option<BuildStatus>,
    pub duration_seconds: Option<i64>,
}

/// What the end-of-run report needs to know about a finished build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub kind: BuildKind,
    pub id: String,
    pub project: String,
    pub number: Option<i64>,
    pub status: BuildStatus,
    pub initiator: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub phases: Vec<PhaseRow>,
    /// CloudWatch console link reported by the service
    pub logs_link: Option<String>,
}

impl BuildSummary {
    pub fn from_build(build: &Build) -> Self {
        Self {
            kind: BuildKind::Single,
            id: build.id.clone(),
            project: build.project().to_string(),
            number: build.build_number,
            status: build.status(),
            initiator: build.initiator.clone(),
            started_at: build.started_at(),
            ended_at: build.ended_at(),
            phases: build
                .phases
                .iter()
                .map(|p| PhaseRow {
                    name: p
                        .phase_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "UNKNOWN".into()),
                    status: p.phase_status,
                    duration_seconds: p.duration_in_seconds,
                })
                .collect(),
            logs_link: build.logs.as_ref().and_then(|l| l.deep_link.clone()),
        }
    }

    pub fn from_batch(batch: &BuildBatch) -> Self {
        Self {
            kind: BuildKind::Batch,
            id: batch.id.clone(),
            project: batch.project().to_string(),
            number: batch.build_batch_number,
            status: batch.status(),
            initiator: batch.initiator.clone(),
            started_at: batch.started_at(),
            ended_at: batch.ended_at(),
            phases: batch
                .phases
                .iter()
                .map(|p| PhaseRow {
                    name: p
                        .phase_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "UNKNOWN".into()),
                    status: p.phase_status,
                    duration_seconds: p.duration_in_seconds,
                })
                .collect(),
            logs_link: None,
        }
    }
}

/// How a run ended, inspected by the caller after all output is written
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Started without waiting for completion
    Detached { id: String },
    /// Reached the terminal phase with a final status
    Completed {
        summary: BuildSummary,
        outputs: BuildOutputs,
    },
    /// Status became final before the terminal phase was reported
    Incomplete { id: String, status: BuildStatus },
    /// Stopped on request
    Cancelled { id: String },
}

impl RunOutcome {
    pub fn id(&self) -> &str {
        match self {
            RunOutcome::Detached { id }
            | RunOutcome::Incomplete { id, .. }
            | RunOutcome::Cancelled { id } => id,
            RunOutcome::Completed { outputs, .. } => &outputs.id,
        }
    }

    /// Deferred failure report, if the run should be marked failed
    pub fn failure(&self) -> Option<String> {
        match self {
            RunOutcome::Completed { outputs, .. } if outputs.build_status.is_failure() => {
                Some(format!(
                    "Job {} was finished with failed status: {}",
                    outputs.id, outputs.build_status
                ))
            }
            RunOutcome::Incomplete { id, status } => Some(format!(
                "Job {id} stopped with status {status} before reaching its final phase"
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
