// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown step summary for a finished build

use cbr_core::{BuildKind, BuildSummary};
use std::fmt::Write;

const CONSOLE_PATH: &str = "codesuite/codebuild/projects";

/// Where build links point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLinks {
    pub region: String,
    /// Replaces `https://<region>.console.aws.amazon.com`
    pub redirect_base_url: Option<String>,
}

impl ConsoleLinks {
    pub fn new(region: impl Into<String>, redirect_base_url: Option<String>) -> Self {
        Self {
            region: region.into(),
            redirect_base_url,
        }
    }

    fn origin(&self) -> String {
        match &self.redirect_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.console.aws.amazon.com", self.region),
        }
    }

    /// Console page of one build or batch
    pub fn build_url(&self, summary: &BuildSummary) -> String {
        let segment = match summary.kind {
            BuildKind::Single => "build",
            BuildKind::Batch => "batch",
        };
        format!(
            "{}/{CONSOLE_PATH}/{}/{segment}/{}/?region={}",
            self.origin(),
            summary.project,
            summary.id.replace(':', "%3A"),
            self.region
        )
    }
}

/// `1h 2m 3s`, `2m 3s` or `3s`. Days are folded into hours.
pub fn format_seconds(seconds: i64) -> String {
    let total = seconds.max(0);
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

pub fn render(summary: &BuildSummary, links: &ConsoleLinks) -> String {
    let mut md = String::new();
    let noun = match summary.kind {
        BuildKind::Single => "build",
        BuildKind::Batch => "batch build",
    };
    let number = summary.number.map(|n| format!(" #{n}")).unwrap_or_default();

    // Writing to a String cannot fail
    let _ = writeln!(md, "## CodeBuild {noun}{number} for `{}`", summary.project);
    let _ = writeln!(md);
    let _ = writeln!(md, "- Status: **{}**", summary.status);
    let _ = writeln!(
        md,
        "- {}: [{}]({})",
        capitalize(noun),
        summary.id,
        links.build_url(summary)
    );
    if let Some(initiator) = &summary.initiator {
        let _ = writeln!(md, "- Initiator: {initiator}");
    }
    if let (Some(start), Some(end)) = (summary.started_at, summary.ended_at) {
        let _ = writeln!(
            md,
            "- Duration: {}",
            format_seconds((end - start).num_seconds())
        );
    }
    if let Some(link) = &summary.logs_link {
        let _ = writeln!(md, "- Logs: [CloudWatch]({link})");
    }

    if !summary.phases.is_empty() {
        let _ = writeln!(md);
        let _ = writeln!(md, "| Phase | Status | Duration |");
        let _ = writeln!(md, "| --- | --- | --- |");
        for phase in &summary.phases {
            let status = phase
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".into());
            let duration = phase
                .duration_seconds
                .map(format_seconds)
                .unwrap_or_else(|| "-".into());
            let _ = writeln!(md, "| {} | {status} | {duration} |", phase.name);
        }
    }
    md
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
