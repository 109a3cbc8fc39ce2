// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build and batch records as reported by the build service
//!
//! Field names follow the CodeBuild JSON protocol. A poller never patches a
//! record: every status response replaces the previous one wholesale.

use crate::log::LogTarget;
use crate::phase::{BatchPhase, BuildPhase};
use crate::status::BuildStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reported build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Build {
    /// `<project>:<run id>`
    pub id: String,
    pub arn: Option<String>,
    pub project_name: Option<String>,
    pub build_number: Option<i64>,
    /// Epoch seconds
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub current_phase: Option<BuildPhase>,
    pub build_status: Option<BuildStatus>,
    pub initiator: Option<String>,
    pub timeout_in_minutes: Option<i64>,
    pub logs: Option<LogsLocation>,
    pub phases: Vec<BuildPhaseRecord>,
}

/// One reported batch build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildBatch {
    pub id: String,
    pub arn: Option<String>,
    pub project_name: Option<String>,
    pub build_batch_number: Option<i64>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub current_phase: Option<BatchPhase>,
    pub build_batch_status: Option<BuildStatus>,
    pub initiator: Option<String>,
    pub build_timeout_in_minutes: Option<i64>,
    pub log_config: Option<LogsConfig>,
    pub phases: Vec<BatchPhaseRecord>,
}

/// Where a build's logs live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogsLocation {
    /// Resolved group, present once the build has written logs
    pub group_name: Option<String>,
    /// Resolved stream, present once the build has written logs
    pub stream_name: Option<String>,
    pub deep_link: Option<String>,
    pub cloud_watch_logs: Option<CloudWatchLogsConfig>,
}

/// Project-level log configuration of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogsConfig {
    pub cloud_watch_logs: Option<CloudWatchLogsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CloudWatchLogsConfig {
    /// `ENABLED` or `DISABLED`
    pub status: Option<String>,
    pub group_name: Option<String>,
    /// Stream name prefix
    pub stream_name: Option<String>,
}

impl CloudWatchLogsConfig {
    pub fn is_enabled(&self) -> bool {
        self.status.as_deref() == Some("ENABLED")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildPhaseRecord {
    pub phase_type: Option<BuildPhase>,
    pub phase_status: Option<BuildStatus>,
    pub duration_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchPhaseRecord {
    pub phase_type: Option<BatchPhase>,
    pub phase_status: Option<BuildStatus>,
    pub duration_in_seconds: Option<i64>,
}

impl Build {
    /// Status, treating an unreported status as still running
    pub fn status(&self) -> BuildStatus {
        self.build_status.unwrap_or_default()
    }

    pub fn project(&self) -> &str {
        project_of(self.project_name.as_deref(), &self.id)
    }

    /// CloudWatch stream to follow, if the build writes to CloudWatch.
    ///
    /// Resolved names win; otherwise the group defaults to
    /// `/aws/codebuild/<project>` and the stream to `[<prefix>/]<run id>`.
    pub fn log_target(&self) -> Option<LogTarget> {
        let logs = self.logs.as_ref()?;
        let config = logs.cloud_watch_logs.as_ref().filter(|c| c.is_enabled())?;
        let group = logs
            .group_name
            .clone()
            .or_else(|| config.group_name.clone())
            .unwrap_or_else(|| default_group(self.project()));
        let stream = logs
            .stream_name
            .clone()
            .unwrap_or_else(|| default_stream(config.stream_name.as_deref(), &self.id));
        Some(LogTarget::new(group, stream))
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_seconds(self.start_time)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_seconds(self.end_time)
    }
}

impl BuildBatch {
    pub fn status(&self) -> BuildStatus {
        self.build_batch_status.unwrap_or_default()
    }

    pub fn project(&self) -> &str {
        project_of(self.project_name.as_deref(), &self.id)
    }

    /// Batches have no resolved stream; the stream is named after the
    /// batch run id under the configured prefix.
    pub fn log_target(&self) -> Option<LogTarget> {
        let config = self
            .log_config
            .as_ref()?
            .cloud_watch_logs
            .as_ref()
            .filter(|c| c.is_enabled())?;
        let group = config
            .group_name
            .clone()
            .unwrap_or_else(|| default_group(self.project()));
        let stream = default_stream(config.stream_name.as_deref(), &self.id);
        Some(LogTarget::new(group, stream))
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_seconds(self.start_time)
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        from_epoch_seconds(self.end_time)
    }
}

/// Run id part of a `<project>:<run id>` identifier
pub fn run_id(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

fn project_of<'a>(project_name: Option<&'a str>, id: &'a str) -> &'a str {
    project_name.unwrap_or_else(|| id.split(':').next().unwrap_or(id))
}

fn default_group(project: &str) -> String {
    format!("/aws/codebuild/{project}")
}

fn default_stream(prefix: Option<&str>, id: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}/{}", prefix, run_id(id)),
        _ => run_id(id).to_string(),
    }
}

fn from_epoch_seconds(seconds: Option<f64>) -> Option<DateTime<Utc>> {
    seconds.and_then(|s| DateTime::from_timestamp_millis((s * 1000.0).round() as i64))
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
