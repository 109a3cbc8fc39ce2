// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use cbr_adapters::{BuildError, HostError};
use thiserror::Error;

/// Errors that end a run
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Can't start {project} CodeBuild job. Empty response from AWS API Endpoint")]
    StartFailed { project: String },
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("build {0} is missing from the status response")]
    BuildNotFound(String),
    #[error("host output failed: {0}")]
    Host(#[from] HostError),
    #[error("no build has been started")]
    NotStarted,
    #[error("a build has already been started")]
    AlreadyStarted,
}
