// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! CodeBuild runner engine: build polling, log following, cancellation

mod cancel;
mod error;
mod follower;
mod job;
mod poller;
mod runtime;
mod session;

pub use cancel::{CancellationController, InterruptHandle};
pub use error::EngineError;
pub use follower::{LogEventFollower, LOG_GRACE_ITERATIONS};
pub use job::{BatchBuild, JobKind, SingleBuild};
pub use poller::{BatchPoller, BuildPoller, Poller, PollerState, RuntimeDeps};
pub use runtime::Runtime;
pub use session::LogSession;
