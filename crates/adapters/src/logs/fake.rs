// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake log service for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LogError, LogService};
use async_trait::async_trait;
use cbr_core::{LogEvent, LogPage, LogQuery};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    pages: VecDeque<Result<LogPage, LogError>>,
    queries: Vec<LogQuery>,
}

/// Fake log service for testing. Answers queued pages in order, then
/// empty pages.
#[derive(Clone, Default)]
pub struct FakeLogService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeLogService {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_page(&self, page: LogPage) {
        self.lock().pages.push_back(Ok(page));
    }

    /// Queue a page of `(timestamp, message)` events
    pub fn push_events(&self, events: &[(i64, &str)], next_token: Option<&str>) {
        self.push_page(LogPage {
            events: events
                .iter()
                .map(|(ts, message)| LogEvent::new(*ts, *message))
                .collect(),
            next_forward_token: next_token.map(str::to_string),
        });
    }

    pub fn push_error(&self, error: LogError) {
        self.lock().pages.push_back(Err(error));
    }

    /// Every query received, in order
    pub fn queries(&self) -> Vec<LogQuery> {
        self.lock().queries.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().queries.len()
    }
}

#[async_trait]
impl LogService for FakeLogService {
    async fn get_log_events(&self, query: &LogQuery) -> Result<LogPage, LogError> {
        let mut state = self.lock();
        state.queries.push(query.clone());
        state.pages.pop_front().unwrap_or_else(|| Ok(LogPage::default()))
    }
}
