// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host automation environment adapters

mod actions;

pub use actions::ActionsHost;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHost, HostCall};

use thiserror::Error;

/// Errors from host output
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

/// User-facing messages, log groups, step outputs, and the run summary.
///
/// Message writes are best effort; only file-backed outputs can fail.
pub trait HostAdapter: Clone + Send + Sync + 'static {
    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    fn debug(&self, message: &str);

    /// Open a collapsible group; following messages belong to it
    fn start_group(&self, name: &str);

    fn end_group(&self);

    fn set_output(&self, name: &str, value: &str) -> Result<(), HostError>;

    /// Mark the step failed
    fn set_failed(&self, message: &str);

    fn append_summary(&self, markdown: &str) -> Result<(), HostError>;
}
