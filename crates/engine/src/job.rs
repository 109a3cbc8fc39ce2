// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two kinds of remote job: single builds and batch builds

use async_trait::async_trait;
use cbr_adapters::{BuildError, BuildService};
use cbr_core::{
    BatchPhase, Build, BuildBatch, BuildKind, BuildOutputs, BuildPhase, BuildStatus,
    BuildSummary, LogTarget, Phase, StartParams,
};
use serde::Serialize;

/// Service calls and record accessors for one kind of job
#[async_trait]
pub trait JobKind: Send + Sync + 'static {
    type Record: Clone + Serialize + Send + Sync + 'static;
    type Phase: Phase;

    const KIND: BuildKind;

    async fn start<B: BuildService>(
        builds: &B,
        params: &StartParams,
    ) -> Result<Option<Self::Record>, BuildError>;

    async fn fetch<B: BuildService>(
        builds: &B,
        id: &str,
    ) -> Result<Option<Self::Record>, BuildError>;

    async fn stop<B: BuildService>(
        builds: &B,
        id: &str,
    ) -> Result<Option<Self::Record>, BuildError>;

    fn id(record: &Self::Record) -> &str;

    fn phase(record: &Self::Record) -> Option<Self::Phase>;

    fn status(record: &Self::Record) -> BuildStatus;

    fn log_target(record: &Self::Record) -> Option<LogTarget>;

    fn outputs(record: &Self::Record) -> BuildOutputs;

    fn summary(record: &Self::Record) -> BuildSummary;
}

/// A single CodeBuild build
pub struct SingleBuild;

/// A CodeBuild batch build
pub struct BatchBuild;

#[async_trait]
impl JobKind for SingleBuild {
    type Record = Build;
    type Phase = BuildPhase;

    const KIND: BuildKind = BuildKind::Single;

    async fn start<B: BuildService>(
        builds: &B,
        params: &StartParams,
    ) -> Result<Option<Build>, BuildError> {
        builds.start_build(params).await
    }

    async fn fetch<B: BuildService>(builds: &B, id: &str) -> Result<Option<Build>, BuildError> {
        builds.get_build(id).await
    }

    async fn stop<B: BuildService>(builds: &B, id: &str) -> Result<Option<Build>, BuildError> {
        builds.stop_build(id).await
    }

    fn id(record: &Build) -> &str {
        &record.id
    }

    fn phase(record: &Build) -> Option<BuildPhase> {
        record.current_phase
    }

    fn status(record: &Build) -> BuildStatus {
        record.status()
    }

    fn log_target(record: &Build) -> Option<LogTarget> {
        record.log_target()
    }

    fn outputs(record: &Build) -> BuildOutputs {
        BuildOutputs::from_build(record)
    }

    fn summary(record: &Build) -> BuildSummary {
        BuildSummary::from_build(record)
    }
}

#[async_trait]
impl JobKind for BatchBuild {
    type Record = BuildBatch;
    type Phase = BatchPhase;

    const KIND: BuildKind = BuildKind::Batch;

    async fn start<B: BuildService>(
        builds: &B,
        params: &StartParams,
    ) -> Result<Option<BuildBatch>, BuildError> {
        builds.start_build_batch(params).await
    }

    async fn fetch<B: BuildService>(
        builds: &B,
        id: &str,
    ) -> Result<Option<BuildBatch>, BuildError> {
        builds.get_build_batch(id).await
    }

    async fn stop<B: BuildService>(
        builds: &B,
        id: &str,
    ) -> Result<Option<BuildBatch>, BuildError> {
        builds.stop_build_batch(id).await
    }

    fn id(record: &BuildBatch) -> &str {
        &record.id
    }

    fn phase(record: &BuildBatch) -> Option<BatchPhase> {
        record.current_phase
    }

    fn status(record: &BuildBatch) -> BuildStatus {
        record.status()
    }

    fn log_target(record: &BuildBatch) -> Option<LogTarget> {
        record.log_target()
    }

    fn outputs(record: &BuildBatch) -> BuildOutputs {
        BuildOutputs::from_batch(record)
    }

    fn summary(record: &BuildBatch) -> BuildSummary {
        BuildSummary::from_batch(record)
    }
}
