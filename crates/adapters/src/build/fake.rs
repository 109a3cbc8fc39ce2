// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake build service for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BuildError, BuildService};
use async_trait::async_trait;
use cbr_core::{Build, BuildBatch, StartParams};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded build service call
#[derive(Debug, Clone, PartialEq)]
pub enum BuildCall {
    Start { params: StartParams },
    Get { id: String },
    Stop { id: String },
    StartBatch { params: StartParams },
    GetBatch { id: String },
    StopBatch { id: String },
}

/// Scripted answers for one kind of record
struct Script<T> {
    start: Result<Option<T>, BuildError>,
    statuses: VecDeque<Result<Option<T>, BuildError>>,
    last: Option<T>,
    stop: Result<Option<T>, BuildError>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            start: Ok(None),
            statuses: VecDeque::new(),
            last: None,
            stop: Ok(None),
        }
    }

    /// Next scripted status. Once the script runs dry the last record is
    /// repeated, like a build that stopped changing.
    fn next_status(&mut self) -> Result<Option<T>, BuildError> {
        match self.statuses.pop_front() {
            Some(Ok(record)) => {
                if let Some(record) = &record {
                    self.last = Some(record.clone());
                }
                Ok(record)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.clone()),
        }
    }
}

struct FakeState {
    builds: Script<Build>,
    batches: Script<BuildBatch>,
    calls: Vec<BuildCall>,
}

/// Fake build service for testing
#[derive(Clone)]
pub struct FakeBuildService {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeBuildService {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                builds: Script::new(),
                batches: Script::new(),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeBuildService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Build returned by `start_build`
    pub fn set_start(&self, build: Option<Build>) {
        self.lock().builds.start = Ok(build);
    }

    pub fn fail_start(&self, error: BuildError) {
        self.lock().builds.start = Err(error);
    }

    /// Queue the next `get_build` answer
    pub fn push_status(&self, build: Build) {
        self.lock().builds.statuses.push_back(Ok(Some(build)));
    }

    /// Queue a `get_build` answer that carries no build
    pub fn push_missing(&self) {
        self.lock().builds.statuses.push_back(Ok(None));
    }

    pub fn push_status_error(&self, error: BuildError) {
        self.lock().builds.statuses.push_back(Err(error));
    }

    pub fn fail_stop(&self, error: BuildError) {
        self.lock().builds.stop = Err(error);
    }

    pub fn set_batch_start(&self, batch: Option<BuildBatch>) {
        self.lock().batches.start = Ok(batch);
    }

    pub fn push_batch_status(&self, batch: BuildBatch) {
        self.lock().batches.statuses.push_back(Ok(Some(batch)));
    }

    pub fn fail_batch_stop(&self, error: BuildError) {
        self.lock().batches.stop = Err(error);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BuildCall> {
        self.lock().calls.clone()
    }

    /// Number of status fetches, single and batch
    pub fn status_calls(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, BuildCall::Get { .. } | BuildCall::GetBatch { .. }))
            .count()
    }

    fn record(&self, call: BuildCall) {
        self.lock().calls.push(call);
    }
}

#[async_trait]
impl BuildService for FakeBuildService {
    async fn start_build(&self, params: &StartParams) -> Result<Option<Build>, BuildError> {
        self.record(BuildCall::Start {
            params: params.clone(),
        });
        self.lock().builds.start.clone()
    }

    async fn get_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        self.record(BuildCall::Get { id: id.to_string() });
        self.lock().builds.next_status()
    }

    async fn stop_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        self.record(BuildCall::Stop { id: id.to_string() });
        self.lock().builds.stop.clone()
    }

    async fn start_build_batch(
        &self,
        params: &StartParams,
    ) -> Result<Option<BuildBatch>, BuildError> {
        self.record(BuildCall::StartBatch {
            params: params.clone(),
        });
        self.lock().batches.start.clone()
    }

    async fn get_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        self.record(BuildCall::GetBatch { id: id.to_string() });
        self.lock().batches.next_status()
    }

    async fn stop_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        self.record(BuildCall::StopBatch { id: id.to_string() });
        self.lock().batches.stop.clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
