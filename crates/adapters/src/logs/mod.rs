// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote log service adapters

mod cloudwatch;

pub use cloudwatch::CloudWatchLogsAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLogService;

use async_trait::async_trait;
use cbr_core::{LogPage, LogQuery};
use thiserror::Error;

/// Errors from log fetches, classified by how the follower reacts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// The stream does not exist yet; retried on the next cycle
    #[error("log stream not found: {0}")]
    StreamNotFound(String),
    /// Reading logs is not permitted; following stops
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("{0}")]
    Other(String),
}

/// Read pages of a log stream
#[async_trait]
pub trait LogService: Clone + Send + Sync + 'static {
    async fn get_log_events(&self, query: &LogQuery) -> Result<LogPage, LogError>;
}
