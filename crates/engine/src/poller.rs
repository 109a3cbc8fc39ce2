// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build lifecycle state machine
//!
//! The poller starts a job, re-fetches its status on a timer, reacts to
//! phase transitions, and decides when the run is over. Status is the only
//! exit condition: while it reads IN_PROGRESS the poll timer is re-armed,
//! whatever the phase.

use crate::follower::LogEventFollower;
use crate::job::{BatchBuild, JobKind, SingleBuild};
use crate::session::LogSession;
use crate::EngineError;
use cbr_adapters::{BuildService, HostAdapter, LogService};
use cbr_core::{
    Clock, Phase, PhaseState, PhaseTracker, RunOptions, RunOutcome, Scheduler, StartParams,
    Timer, TimerId,
};
use std::sync::{Arc, Mutex};

/// Adapter dependencies of a run
pub struct RuntimeDeps<B, L, H> {
    pub builds: B,
    pub logs: L,
    pub host: H,
}

/// Lifecycle of a poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Started,
    Polling,
    Stopped,
}

/// Poller for single builds
pub type BuildPoller<B, L, H, C> = Poller<SingleBuild, B, L, H, C>;

/// Poller for batch builds
pub type BatchPoller<B, L, H, C> = Poller<BatchBuild, B, L, H, C>;

pub struct Poller<K: JobKind, B, L, H, C: Clock> {
    builds: B,
    logs: L,
    host: H,
    clock: C,
    scheduler: Arc<Mutex<Scheduler>>,
    options: RunOptions,
    timer: Timer<C>,
    state: PollerState,
    record: Option<K::Record>,
    phases: PhaseTracker<K::Phase>,
    session: Option<LogSession<L, H, C>>,
    outcome: Option<RunOutcome>,
    cancelled: bool,
}

impl<K, B, L, H, C> Poller<K, B, L, H, C>
where
    K: JobKind,
    B: BuildService,
    L: LogService,
    H: HostAdapter,
    C: Clock,
{
    pub fn new(
        deps: RuntimeDeps<B, L, H>,
        scheduler: Arc<Mutex<Scheduler>>,
        clock: C,
        options: RunOptions,
    ) -> Self {
        let timer = Timer::new(TimerId::BuildPoll, scheduler.clone(), clock.clone());
        Self {
            builds: deps.builds,
            logs: deps.logs,
            host: deps.host,
            clock,
            scheduler,
            options,
            timer,
            state: PollerState::Idle,
            record: None,
            phases: PhaseTracker::new(),
            session: None,
            outcome: None,
            cancelled: false,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Latest record reported by the service
    pub fn record(&self) -> Option<&K::Record> {
        self.record.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.record.as_ref().map(K::id)
    }

    pub fn current_phase(&self) -> PhaseState<K::Phase> {
        self.phases.current()
    }

    pub fn session(&self) -> Option<&LogSession<L, H, C>> {
        self.session.as_ref()
    }

    /// Set once the run is over
    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Start the job and run the first poll iteration.
    ///
    /// Without `wait_for_completion` this returns right after the start
    /// call: no status fetch, no timer, no log session.
    pub async fn start(&mut self, params: &StartParams) -> Result<K::Record, EngineError> {
        if self.state != PollerState::Idle {
            return Err(EngineError::AlreadyStarted);
        }

        let project = &params.project_name;
        self.host
            .info(&format!("Starting \"{project}\" CodeBuild project job"));

        let record = K::start(&self.builds, params)
            .await?
            .ok_or_else(|| EngineError::StartFailed {
                project: project.clone(),
            })?;
        let id = K::id(&record).to_string();
        self.host
            .info(&format!("CodeBuild project job {id} was started successfully"));
        tracing::info!(id, kind = ?K::KIND, "job started");
        self.debug_record("Start response", &record);

        self.record = Some(record.clone());
        self.state = PollerState::Started;

        if !self.options.wait_for_completion {
            self.state = PollerState::Stopped;
            self.outcome = Some(RunOutcome::Detached { id });
            return Ok(record);
        }

        if self.options.show_logs {
            match K::log_target(&record) {
                Some(target) => {
                    let timer = Timer::new(
                        TimerId::LogPoll,
                        self.scheduler.clone(),
                        self.clock.clone(),
                    );
                    let follower = LogEventFollower::new(
                        self.logs.clone(),
                        self.host.clone(),
                        target,
                        timer,
                        self.options.logs_poll_interval,
                    );
                    self.session = Some(LogSession::new(follower, self.host.clone()));
                }
                None => self
                    .host
                    .info(&format!("Can't find logs output for AWS CodeBuild job: {id}")),
            }
        }

        self.state = PollerState::Polling;
        self.wait().await?;
        Ok(record)
    }

    /// One poll iteration
    pub async fn wait(&mut self) -> Result<(), EngineError> {
        if self.state != PollerState::Polling {
            return Ok(());
        }
        let id = self.id().ok_or(EngineError::NotStarted)?.to_string();

        let record = K::fetch(&self.builds, &id)
            .await?
            .ok_or_else(|| EngineError::BuildNotFound(id.clone()))?;
        self.debug_record("Status response", &record);
        let status = K::status(&record);

        if let Some(change) = K::phase(&record).and_then(|p| self.phases.observe(p)) {
            tracing::info!(id, from = %change.previous, to = %change.current, "phase changed");
            self.host.info(&format!(
                "Build phase was changed to the \"{}\"",
                change.current
            ));
            if change.current.has_logs() {
                if let Some(session) = self.session.as_mut() {
                    session.start().await;
                }
            }
        }
        self.record = Some(record.clone());

        let phase_terminal = self.phases.current().is_terminal();
        if phase_terminal {
            if let Some(session) = self.session.as_mut() {
                session.stop(false);
            }
        }

        if status.is_in_progress() {
            self.timer.arm(self.options.poll_interval);
            return Ok(());
        }

        self.state = PollerState::Stopped;
        self.timer.clear();

        if phase_terminal {
            let outputs = K::outputs(&record);
            for (name, value) in outputs.pairs() {
                self.host.set_output(name, &value)?;
            }
            tracing::info!(id, %status, "job finished");
            self.outcome = Some(RunOutcome::Completed {
                summary: K::summary(&record),
                outputs,
            });
        } else {
            self.host.warning(&format!(
                "Job {id} reported status {status} in phase {} before reaching its final phase",
                self.phases.current()
            ));
            if let Some(session) = self.session.as_mut() {
                session.stop(false);
            }
            self.outcome = Some(RunOutcome::Incomplete { id, status });
        }
        Ok(())
    }

    /// The log timer fired
    pub async fn on_log_timer(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.on_timer().await;
        }
    }

    /// Stop the remote job.
    ///
    /// The poll timer is cleared and the log session force-stopped even when
    /// the stop call fails. A second call does nothing.
    pub async fn cancel(&mut self) -> Result<(), EngineError> {
        if self.cancelled {
            return Ok(());
        }
        self.cancelled = true;
        let _clear = self.timer.clear_on_drop();

        let Some(id) = self.id().map(str::to_string) else {
            self.state = PollerState::Stopped;
            return Ok(());
        };
        if self.state != PollerState::Polling {
            self.shutdown();
            return Ok(());
        }

        self.host.info(&format!("Canceling job {id}"));
        let result = K::stop(&self.builds, &id).await;
        self.state = PollerState::Stopped;
        if let Some(session) = self.session.as_mut() {
            session.stop(true);
        }
        result?;

        self.host
            .info(&format!("Build {id} was successfully canceled"));
        self.outcome = Some(RunOutcome::Cancelled { id });
        Ok(())
    }

    /// Dump a service response to the host's debug channel
    fn debug_record(&self, message: &str, record: &K::Record) {
        match serde_json::to_string(record) {
            Ok(json) => self.host.debug(&format!("[DEBUG] {message}\n{json}")),
            Err(e) => self.host.debug(&format!(
                "[DEBUG] Can't stringify additional debug data for the message: {message}. Error: {e}"
            )),
        }
    }

    /// Clear every timer this poller owns and close the log group
    pub fn shutdown(&mut self) {
        self.timer.clear();
        if let Some(session) = self.session.as_mut() {
            session.shutdown();
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
