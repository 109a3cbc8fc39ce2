// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental reader of one log stream

use cbr_adapters::{HostAdapter, LogError, LogService};
use cbr_core::{Clock, LogCursor, LogQuery, LogTarget, Timer, LOG_PAGE_LIMIT};
use std::time::Duration;

/// Fetch rounds still run after a non-forced stop, so lines written just
/// before the build finished are not lost
pub const LOG_GRACE_ITERATIONS: u32 = 2;

/// Follows a log stream on a timer and forwards each line to the host.
///
/// Lifecycle: idle until [`start_listen`](Self::start_listen), then one
/// fetch round per timer fire until stopped. A non-forced stop drains
/// [`LOG_GRACE_ITERATIONS`] more rounds; a forced stop ends at once.
pub struct LogEventFollower<L, H, C: Clock> {
    logs: L,
    host: H,
    target: LogTarget,
    cursor: LogCursor,
    timer: Timer<C>,
    interval: Duration,
    listening: bool,
    stopping: bool,
    grace: u32,
    finished: bool,
}

impl<L, H, C> LogEventFollower<L, H, C>
where
    L: LogService,
    H: HostAdapter,
    C: Clock,
{
    pub fn new(logs: L, host: H, target: LogTarget, timer: Timer<C>, interval: Duration) -> Self {
        Self {
            logs,
            host,
            target,
            cursor: LogCursor::new(),
            timer,
            interval,
            listening: false,
            stopping: false,
            grace: 0,
            finished: false,
        }
    }

    pub fn target(&self) -> &LogTarget {
        &self.target
    }

    pub fn cursor(&self) -> &LogCursor {
        &self.cursor
    }

    /// Started and not yet finished
    pub fn is_listening(&self) -> bool {
        self.listening && !self.finished
    }

    /// No further fetch will happen
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Begin following. Runs the first round now; later calls are no-ops.
    pub async fn start_listen(&mut self) {
        if self.listening || self.finished {
            return;
        }
        self.listening = true;
        tracing::debug!(stream = %self.target, "listening");
        self.round().await;
    }

    /// The log timer fired
    pub async fn on_timer(&mut self) {
        if !self.is_listening() {
            return;
        }
        self.round().await;
    }

    /// Stop following, either now (`force`) or after the grace rounds.
    /// Repeating a non-forced stop does not extend the grace period.
    pub fn stop_listen(&mut self, force: bool) {
        if self.finished {
            return;
        }
        if force || !self.listening {
            self.stopping = true;
            self.grace = 0;
            self.finish();
            return;
        }
        if !self.stopping {
            self.stopping = true;
            self.grace = LOG_GRACE_ITERATIONS;
            tracing::debug!(stream = %self.target, grace = self.grace, "draining");
        }
    }

    /// Fetch everything new, following continuation tokens
    pub async fn get_events(&mut self) {
        loop {
            let query = LogQuery {
                target: self.target.clone(),
                start: self.cursor.start(),
                limit: LOG_PAGE_LIMIT,
            };

            match self.logs.get_log_events(&query).await {
                Ok(page) => {
                    for event in &page.events {
                        if let Some(message) = &event.message {
                            self.host.info(message.trim_end());
                        }
                    }
                    self.cursor.advance(&page);
                    if self.cursor.next_token().is_none() {
                        return;
                    }
                }
                Err(LogError::StreamNotFound(_)) => {
                    self.host.info(&format!(
                        "CloudWatch stream {} not found. Trying again...",
                        self.target
                    ));
                    return;
                }
                Err(e @ LogError::AccessDenied(_)) => {
                    self.host.error(&e.to_string());
                    self.stop_listen(true);
                    return;
                }
                Err(e) => {
                    self.host.error(&e.to_string());
                    self.cursor.reset_token();
                    return;
                }
            }
        }
    }

    async fn round(&mut self) {
        self.get_events().await;
        if self.finished {
            return;
        }
        if self.stopping {
            self.grace = self.grace.saturating_sub(1);
            if self.grace == 0 {
                self.finish();
                return;
            }
        }
        self.timer.arm(self.interval);
    }

    fn finish(&mut self) {
        self.timer.clear();
        if !self.finished {
            self.finished = true;
            tracing::debug!(
                stream = %self.target,
                max_timestamp = self.cursor.max_timestamp(),
                "stopped listening"
            );
        }
    }
}

#[cfg(test)]
#[path = "follower_tests.rs"]
mod tests;
