// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start parameters and run options

use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// Parameters forwarded verbatim to the start call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartParams {
    #[serde(rename = "projectName")]
    pub project_name: String,
    /// Arbitrary request fields, e.g. `environmentVariablesOverride`
    #[serde(flatten)]
    pub overrides: Map<String, Value>,
}

impl StartParams {
    /// The explicit project name wins over an override of the same key
    pub fn new(project_name: impl Into<String>, mut overrides: Map<String, Value>) -> Self {
        overrides.remove("projectName");
        Self {
            project_name: project_name.into(),
            overrides,
        }
    }

    pub fn project(project_name: impl Into<String>) -> Self {
        Self::new(project_name, Map::new())
    }
}

/// How a run polls and what it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub poll_interval: Duration,
    pub logs_poll_interval: Duration,
    /// When false, start the build and return without polling
    pub wait_for_completion: bool,
    pub show_logs: bool,
    /// Base URL that replaces the AWS console origin in build links
    pub redirect_base_url: Option<String>,
    pub batch: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(5000),
            logs_poll_interval: Duration::from_millis(5000),
            wait_for_completion: true,
            show_logs: true,
            redirect_base_url: None,
            batch: false,
        }
    }
}
