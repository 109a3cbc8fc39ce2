// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build phase vocabularies and transition tracking
//!
//! Single builds and batch builds report different phase names. Both are
//! modelled as closed enums behind the [`Phase`] trait so the pollers can
//! share one [`PhaseTracker`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown phase: {0}")]
pub struct ParsePhaseError(pub String);

/// A phase vocabulary
pub trait Phase: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Every named phase in reporting order
    const ALL: &'static [Self];

    /// Wire name, e.g. `DOWNLOAD_SOURCE`
    fn as_str(self) -> &'static str;

    /// Whether the build has finished once this phase is reached
    fn is_terminal(self) -> bool;

    /// Whether the log stream can exist yet. Head phases run before the
    /// build container starts writing.
    fn has_logs(self) -> bool;

    fn parse(s: &str) -> Result<Self, ParsePhaseError> {
        Self::ALL
            .iter()
            .copied()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| ParsePhaseError(s.to_string()))
    }
}

/// Phases of a single CodeBuild build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildPhase {
    Submitted,
    Queued,
    Provisioning,
    DownloadSource,
    Install,
    PreBuild,
    Build,
    PostBuild,
    UploadArtifacts,
    Finalizing,
    Completed,
    /// A phase name this version does not know about
    #[serde(other)]
    Unknown,
}

impl Phase for BuildPhase {
    const ALL: &'static [Self] = &[
        BuildPhase::Submitted,
        BuildPhase::Queued,
        BuildPhase::Provisioning,
        BuildPhase::DownloadSource,
        BuildPhase::Install,
        BuildPhase::PreBuild,
        BuildPhase::Build,
        BuildPhase::PostBuild,
        BuildPhase::UploadArtifacts,
        BuildPhase::Finalizing,
        BuildPhase::Completed,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BuildPhase::Submitted => "SUBMITTED",
            BuildPhase::Queued => "QUEUED",
            BuildPhase::Provisioning => "PROVISIONING",
            BuildPhase::DownloadSource => "DOWNLOAD_SOURCE",
            BuildPhase::Install => "INSTALL",
            BuildPhase::PreBuild => "PRE_BUILD",
            BuildPhase::Build => "BUILD",
            BuildPhase::PostBuild => "POST_BUILD",
            BuildPhase::UploadArtifacts => "UPLOAD_ARTIFACTS",
            BuildPhase::Finalizing => "FINALIZING",
            BuildPhase::Completed => "COMPLETED",
            BuildPhase::Unknown => "UNKNOWN",
        }
    }

    fn is_terminal(self) -> bool {
        self == BuildPhase::Completed
    }

    fn has_logs(self) -> bool {
        !matches!(
            self,
            BuildPhase::Submitted | BuildPhase::Queued | BuildPhase::Provisioning
        )
    }
}

/// Phases of a batch build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchPhase {
    Submitted,
    DownloadBatchspec,
    InProgress,
    CombineArtifacts,
    Succeeded,
    Failed,
    Stopped,
    #[serde(other)]
    Unknown,
}

impl Phase for BatchPhase {
    const ALL: &'static [Self] = &[
        BatchPhase::Submitted,
        BatchPhase::DownloadBatchspec,
        BatchPhase::InProgress,
        BatchPhase::CombineArtifacts,
        BatchPhase::Succeeded,
        BatchPhase::Failed,
        BatchPhase::Stopped,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BatchPhase::Submitted => "SUBMITTED",
            BatchPhase::DownloadBatchspec => "DOWNLOAD_BATCHSPEC",
            BatchPhase::InProgress => "IN_PROGRESS",
            BatchPhase::CombineArtifacts => "COMBINE_ARTIFACTS",
            BatchPhase::Succeeded => "SUCCEEDED",
            BatchPhase::Failed => "FAILED",
            BatchPhase::Stopped => "STOPPED",
            BatchPhase::Unknown => "UNKNOWN",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(
            self,
            BatchPhase::Succeeded | BatchPhase::Failed | BatchPhase::Stopped
        )
    }

    fn has_logs(self) -> bool {
        !matches!(self, BatchPhase::Submitted | BatchPhase::DownloadBatchspec)
    }
}

macro_rules! phase_display_and_parse {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParsePhaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Phase>::parse(s)
            }
        }
    )*};
}

phase_display_and_parse!(BuildPhase, BatchPhase);

/// Last recorded phase, starting from a sentinel before the first report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState<P> {
    Starting,
    Phase(P),
}

impl<P: Phase> PhaseState<P> {
    pub fn phase(self) -> Option<P> {
        match self {
            PhaseState::Starting => None,
            PhaseState::Phase(phase) => Some(phase),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.phase().is_some_and(Phase::is_terminal)
    }
}

impl<P: Phase> fmt::Display for PhaseState<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseState::Starting => f.write_str("STARTING"),
            PhaseState::Phase(phase) => fmt::Display::fmt(phase, f),
        }
    }
}

/// A detected transition between two consecutive status reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange<P> {
    pub previous: PhaseState<P>,
    pub current: P,
}

/// Records the current phase and reports only real transitions
#[derive(Debug, Clone)]
pub struct PhaseTracker<P> {
    current: PhaseState<P>,
}

impl<P: Phase> Default for PhaseTracker<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Phase> PhaseTracker<P> {
    pub fn new() -> Self {
        Self {
            current: PhaseState::Starting,
        }
    }

    pub fn current(&self) -> PhaseState<P> {
        self.current
    }

    /// Record a reported phase. Returns `None` when it equals the last one.
    pub fn observe(&mut self, reported: P) -> Option<PhaseChange<P>> {
        if self.current == PhaseState::Phase(reported) {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, PhaseState::Phase(reported));
        Some(PhaseChange {
            previous,
            current: reported,
        })
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
