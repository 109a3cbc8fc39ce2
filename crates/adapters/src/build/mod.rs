// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote build service adapters

mod codebuild;

pub use codebuild::CodeBuildAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BuildCall, FakeBuildService};

use crate::aws::AwsError;
use async_trait::async_trait;
use cbr_core::{Build, BuildBatch, StartParams};
use thiserror::Error;

/// Errors from build service calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Aws(#[from] AwsError),
    #[error("remote call failed: {0}")]
    Remote(String),
}

/// Start, inspect, and stop builds and batch builds.
///
/// Every call returns the service's current view of the build, or `None`
/// when the response carried no build.
#[async_trait]
pub trait BuildService: Clone + Send + Sync + 'static {
    async fn start_build(&self, params: &StartParams) -> Result<Option<Build>, BuildError>;

    async fn get_build(&self, id: &str) -> Result<Option<Build>, BuildError>;

    async fn stop_build(&self, id: &str) -> Result<Option<Build>, BuildError>;

    async fn start_build_batch(
        &self,
        params: &StartParams,
    ) -> Result<Option<BuildBatch>, BuildError>;

    async fn get_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError>;

    async fn stop_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError>;
}
