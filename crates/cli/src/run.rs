// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drive one job and report how it ended

use crate::summary::{self, ConsoleLinks};
use cbr_adapters::{BuildService, HostAdapter, LogService};
use cbr_core::{RunOptions, RunOutcome, StartParams, SystemClock};
use cbr_engine::{CancellationController, EngineError, JobKind, Runtime, RuntimeDeps};

/// Start the job on the wall clock and wait for its outcome
pub async fn run_job<K, B, L, H>(
    deps: RuntimeDeps<B, L, H>,
    options: RunOptions,
    params: &StartParams,
    cancel: &mut CancellationController,
) -> Result<RunOutcome, EngineError>
where
    K: JobKind,
    B: BuildService,
    L: LogService,
    H: HostAdapter,
{
    let mut runtime = Runtime::<K, B, L, H, SystemClock>::new(deps, SystemClock, options);
    runtime.execute(params, cancel).await
}

/// Write the step summary, then the deferred failure if there is one.
///
/// Returns whether the step succeeded.
pub fn report<H: HostAdapter>(host: &H, outcome: &RunOutcome, links: &ConsoleLinks) -> bool {
    if let RunOutcome::Completed { summary, .. } = outcome {
        if let Err(e) = host.append_summary(&summary::render(summary, links)) {
            tracing::warn!(error = %e, "failed to write step summary");
        }
    }

    match outcome.failure() {
        Some(message) => {
            host.set_failed(&message);
            false
        }
        None => true,
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
