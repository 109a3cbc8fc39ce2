// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log session: one follower plus the host log group around its output

use crate::follower::LogEventFollower;
use cbr_adapters::{HostAdapter, LogService};
use cbr_core::Clock;

/// Owns the follower of a build's log stream.
///
/// Starts at most once. Build log lines are wrapped in a host log group
/// that closes when the follower finishes, is forced to stop, or the run
/// shuts down.
pub struct LogSession<L, H, C: Clock> {
    follower: LogEventFollower<L, H, C>,
    host: H,
    started: bool,
    group_open: bool,
}

impl<L, H, C> LogSession<L, H, C>
where
    L: LogService,
    H: HostAdapter,
    C: Clock,
{
    pub fn new(follower: LogEventFollower<L, H, C>, host: H) -> Self {
        Self {
            follower,
            host,
            started: false,
            group_open: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn follower(&self) -> &LogEventFollower<L, H, C> {
        &self.follower
    }

    /// Open the log group and start following. No-op once stopped.
    pub async fn start(&mut self) {
        if self.started || self.follower.is_finished() {
            return;
        }
        self.started = true;
        self.host
            .start_group(&format!("Build logs: {}", self.follower.target()));
        self.group_open = true;
        self.follower.start_listen().await;
        self.close_if_finished();
    }

    /// The log timer fired
    pub async fn on_timer(&mut self) {
        self.follower.on_timer().await;
        self.close_if_finished();
    }

    pub fn stop(&mut self, force: bool) {
        self.follower.stop_listen(force);
        self.close_if_finished();
    }

    /// Force-stop and close the log group
    pub fn shutdown(&mut self) {
        self.follower.stop_listen(true);
        self.close_group();
    }

    fn close_if_finished(&mut self) {
        if self.follower.is_finished() {
            self.close_group();
        }
    }

    fn close_group(&mut self) {
        if self.group_open {
            self.group_open = false;
            self.host.end_group();
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
