// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::build::{BuildError, BuildService};
use crate::logs::{LogError, LogService};
use async_trait::async_trait;
use cbr_core::{Build, BuildBatch, LogPage, LogQuery, StartParams};
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Await `fut`, returning its result and the elapsed milliseconds
async fn timed<T>(fut: impl Future<Output = T>) -> (T, u64) {
    let start = Instant::now();
    let result = fut.await;
    (result, start.elapsed().as_millis() as u64)
}

/// Wrapper that adds tracing to any BuildService
#[derive(Clone)]
pub struct TracedBuildService<S> {
    inner: S,
}

impl<S> TracedBuildService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: BuildService> BuildService for TracedBuildService<S> {
    async fn start_build(&self, params: &StartParams) -> Result<Option<Build>, BuildError> {
        let span = tracing::info_span!("build.start", project = %params.project_name);
        async {
            tracing::info!(overrides = params.overrides.len(), "starting");
            let (result, elapsed_ms) = timed(self.inner.start_build(params)).await;
            match &result {
                Ok(Some(build)) => tracing::info!(id = %build.id, elapsed_ms, "build started"),
                Ok(None) => tracing::warn!(elapsed_ms, "empty start response"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        let span = tracing::debug_span!("build.get", id);
        async {
            let (result, elapsed_ms) = timed(self.inner.get_build(id)).await;
            match &result {
                Ok(Some(build)) => tracing::debug!(
                    phase = ?build.current_phase,
                    status = %build.status(),
                    elapsed_ms,
                    "fetched"
                ),
                Ok(None) => tracing::warn!(elapsed_ms, "build missing from response"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "status fetch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn stop_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        let span = tracing::info_span!("build.stop", id);
        async {
            let (result, elapsed_ms) = timed(self.inner.stop_build(id)).await;
            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "stopped"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "stop failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn start_build_batch(
        &self,
        params: &StartParams,
    ) -> Result<Option<BuildBatch>, BuildError> {
        let span = tracing::info_span!("batch.start", project = %params.project_name);
        async {
            tracing::info!(overrides = params.overrides.len(), "starting");
            let (result, elapsed_ms) = timed(self.inner.start_build_batch(params)).await;
            match &result {
                Ok(Some(batch)) => tracing::info!(id = %batch.id, elapsed_ms, "batch started"),
                Ok(None) => tracing::warn!(elapsed_ms, "empty start response"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn get_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        let span = tracing::debug_span!("batch.get", id);
        async {
            let (result, elapsed_ms) = timed(self.inner.get_build_batch(id)).await;
            match &result {
                Ok(Some(batch)) => tracing::debug!(
                    phase = ?batch.current_phase,
                    status = %batch.status(),
                    elapsed_ms,
                    "fetched"
                ),
                Ok(None) => tracing::warn!(elapsed_ms, "batch missing from response"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "status fetch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn stop_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        let span = tracing::info_span!("batch.stop", id);
        async {
            let (result, elapsed_ms) = timed(self.inner.stop_build_batch(id)).await;
            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "stopped"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "stop failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any LogService
#[derive(Clone)]
pub struct TracedLogService<L> {
    inner: L,
}

impl<L> TracedLogService<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<L: LogService> LogService for TracedLogService<L> {
    async fn get_log_events(&self, query: &LogQuery) -> Result<LogPage, LogError> {
        let span = tracing::debug_span!(
            "logs.get",
            stream = %query.target,
            start = ?query.start
        );
        async {
            let (result, elapsed_ms) = timed(self.inner.get_log_events(query)).await;
            match &result {
                Ok(page) => tracing::debug!(
                    events = page.events.len(),
                    more = page.next_forward_token.is_some(),
                    elapsed_ms,
                    "fetched"
                ),
                // Expected until the build container starts writing
                Err(LogError::StreamNotFound(_)) => {
                    tracing::debug!(elapsed_ms, "stream not found yet")
                }
                Err(e) => tracing::warn!(elapsed_ms, error = %e, "log fetch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
