// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: AWS services and the CI host

pub mod aws;
pub mod build;
pub mod host;
pub mod logs;
pub mod traced;

pub use aws::{AwsClient, AwsConfig, AwsError, AwsService, Credentials};
pub use build::{BuildError, BuildService, CodeBuildAdapter};
pub use host::{ActionsHost, HostAdapter, HostError};
pub use logs::{CloudWatchLogsAdapter, LogError, LogService};
pub use traced::{TracedBuildService, TracedLogService};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use build::{BuildCall, FakeBuildService};
#[cfg(any(test, feature = "test-support"))]
pub use host::{FakeHost, HostCall};
#[cfg(any(test, feature = "test-support"))]
pub use logs::FakeLogService;
