// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cbr-core: domain types for the CodeBuild runner
//!
//! This crate provides:
//! - Build and batch records with their phase and status vocabularies
//! - Log stream addressing and the read cursor
//! - A virtual-time scheduler for the poll and log timers
//! - Run parameters, options, and outcomes

pub mod build;
pub mod clock;
pub mod log;
pub mod outcome;
pub mod params;
pub mod phase;
pub mod scheduler;
pub mod status;

pub use build::{
    run_id, BatchPhaseRecord, Build, BuildBatch, BuildPhaseRecord, CloudWatchLogsConfig,
    LogsConfig, LogsLocation,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use log::{LogCursor, LogEvent, LogPage, LogQuery, LogStart, LogTarget, LOG_PAGE_LIMIT};
pub use outcome::{BuildKind, BuildOutputs, BuildSummary, PhaseRow, RunOutcome};
pub use params::{RunOptions, StartParams};
pub use phase::{BatchPhase, BuildPhase, ParsePhaseError, Phase, PhaseChange, PhaseState, PhaseTracker};
pub use scheduler::{ClearOnDrop, ScheduledItem, Scheduler, TimerId, Timer};
pub use status::BuildStatus;
