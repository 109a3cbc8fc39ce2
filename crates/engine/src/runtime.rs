// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime that drives one job to its outcome

use crate::cancel::CancellationController;
use crate::job::JobKind;
use crate::poller::{Poller, RuntimeDeps};
use crate::EngineError;
use cbr_adapters::{BuildService, HostAdapter, LogService};
use cbr_core::{Clock, RunOptions, RunOutcome, Scheduler, StartParams, TimerId};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Owns the poller and the scheduler its timers live in.
///
/// Build-poll and log-poll timers fire one at a time, in deadline order,
/// so the two loops never overlap.
pub struct Runtime<K: JobKind, B, L, H, C: Clock> {
    poller: Poller<K, B, L, H, C>,
    scheduler: Arc<Mutex<Scheduler>>,
    clock: C,
}

impl<K, B, L, H, C> Runtime<K, B, L, H, C>
where
    K: JobKind,
    B: BuildService,
    L: LogService,
    H: HostAdapter,
    C: Clock,
{
    pub fn new(deps: RuntimeDeps<B, L, H>, clock: C, options: RunOptions) -> Self {
        let scheduler = Arc::new(Mutex::new(Scheduler::new()));
        let poller = Poller::new(deps, scheduler.clone(), clock.clone(), options);
        Self {
            poller,
            scheduler,
            clock,
        }
    }

    pub fn poller(&self) -> &Poller<K, B, L, H, C> {
        &self.poller
    }

    /// Whether a timer is pending
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.lock().is_armed(id)
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().next_fire_time()
    }

    /// Start the job. On failure every timer is cleared.
    pub async fn start(&mut self, params: &StartParams) -> Result<K::Record, EngineError> {
        let result = self.poller.start(params).await;
        if result.is_err() {
            self.poller.shutdown();
        }
        result
    }

    /// Fire every due timer. Returns how many fired.
    pub async fn run_due(&mut self) -> Result<usize, EngineError> {
        let due = self.lock().poll(self.clock.now());
        for item in &due {
            tracing::trace!(timer = %item.id, "fired");
            match item.id {
                TimerId::BuildPoll => {
                    if let Err(e) = self.poller.wait().await {
                        self.poller.shutdown();
                        return Err(e);
                    }
                }
                TimerId::LogPoll => self.poller.on_log_timer().await,
            }
        }
        Ok(due.len())
    }

    /// Drive timers until none is armed or cancellation is requested.
    ///
    /// Returns the outcome once trailing log rounds have finished, so the
    /// caller reports it after the last log line.
    pub async fn run(
        &mut self,
        cancel: &mut CancellationController,
    ) -> Result<RunOutcome, EngineError> {
        loop {
            if cancel.is_requested() {
                return self.cancel().await;
            }
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let delay = deadline.saturating_duration_since(self.clock.now());

            tokio::select! {
                biased;
                _ = cancel.requested() => return self.cancel().await,
                _ = tokio::time::sleep(delay) => {}
            }

            self.run_due().await?;
        }

        self.poller.shutdown();
        self.poller.outcome().cloned().ok_or(EngineError::NotStarted)
    }

    /// Start the job and drive it to its outcome
    pub async fn execute(
        &mut self,
        params: &StartParams,
        cancel: &mut CancellationController,
    ) -> Result<RunOutcome, EngineError> {
        self.start(params).await?;
        self.run(cancel).await
    }

    async fn cancel(&mut self) -> Result<RunOutcome, EngineError> {
        tracing::info!(
            id = ?self.poller.id(),
            phase = %self.poller.current_phase(),
            "cancellation requested"
        );
        let result = self.poller.cancel().await;
        self.poller.shutdown();
        result?;

        if let Some(outcome) = self.poller.outcome() {
            return Ok(outcome.clone());
        }
        let id = self.poller.id().ok_or(EngineError::NotStarted)?;
        Ok(RunOutcome::Cancelled { id: id.to_string() })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Scheduler> {
        self.scheduler.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
