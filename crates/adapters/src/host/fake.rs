// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake host for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HostAdapter, HostError};
use std::sync::{Arc, Mutex};

/// Recorded host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Info(String),
    Warning(String),
    Error(String),
    Debug(String),
    StartGroup(String),
    EndGroup,
    SetOutput { name: String, value: String },
    SetFailed(String),
    AppendSummary(String),
}

/// Fake host for testing
#[derive(Clone, Default)]
pub struct FakeHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.collect(|c| match c {
            HostCall::Info(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.collect(|c| match c {
            HostCall::Warning(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|c| match c {
            HostCall::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.collect(|c| match c {
            HostCall::SetOutput { name, value } => Some((name.clone(), value.clone())),
            _ => None,
        })
    }

    /// Value of a step output, if it was set
    pub fn output(&self, name: &str) -> Option<String> {
        self.outputs()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn failures(&self) -> Vec<String> {
        self.collect(|c| match c {
            HostCall::SetFailed(m) => Some(m.clone()),
            _ => None,
        })
    }

    fn collect<T>(&self, f: impl Fn(&HostCall) -> Option<T>) -> Vec<T> {
        self.calls().iter().filter_map(f).collect()
    }

    fn record(&self, call: HostCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl HostAdapter for FakeHost {
    fn info(&self, message: &str) {
        self.record(HostCall::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.record(HostCall::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(HostCall::Error(message.to_string()));
    }

    fn debug(&self, message: &str) {
        self.record(HostCall::Debug(message.to_string()));
    }

    fn start_group(&self, name: &str) {
        self.record(HostCall::StartGroup(name.to_string()));
    }

    fn end_group(&self) {
        self.record(HostCall::EndGroup);
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.record(HostCall::SetOutput {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.record(HostCall::SetFailed(message.to_string()));
    }

    fn append_summary(&self, markdown: &str) -> Result<(), HostError> {
        self.record(HostCall::AppendSummary(markdown.to_string()));
        Ok(())
    }
}
