// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log stream addressing, pages, and the read cursor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size for one log fetch
pub const LOG_PAGE_LIMIT: u32 = 1000;

/// A CloudWatch log group + stream pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogTarget {
    pub group: String,
    pub stream: String,
}

impl LogTarget {
    pub fn new(group: impl Into<String>, stream: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            stream: stream.into(),
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.stream)
    }
}

/// One log line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEvent {
    /// Milliseconds since the epoch
    pub timestamp: Option<i64>,
    pub message: Option<String>,
    pub ingestion_time: Option<i64>,
}

impl LogEvent {
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            message: Some(message.into()),
            ingestion_time: Some(timestamp),
        }
    }
}

/// One page of a log stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogPage {
    pub events: Vec<LogEvent>,
    pub next_forward_token: Option<String>,
}

/// Where a fetch starts reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStart {
    /// From the head of the stream
    Beginning,
    /// Events at or after this timestamp (ms)
    Time(i64),
    /// Continue a previous page. Excludes any time bound.
    Token(String),
}

/// A single log fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub target: LogTarget,
    pub start: LogStart,
    pub limit: u32,
}

/// How much of a stream has been consumed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCursor {
    max_timestamp: i64,
    next_token: Option<String>,
}

impl LogCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest event timestamp seen so far (ms), 0 before any event
    pub fn max_timestamp(&self) -> i64 {
        self.max_timestamp
    }

    /// Continuation token of the page being read, if mid-page
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    /// Start of the next fetch: the pending token if mid-page, else
    /// strictly after the newest event seen.
    pub fn start(&self) -> LogStart {
        match &self.next_token {
            Some(token) => LogStart::Token(token.clone()),
            None if self.max_timestamp > 0 => LogStart::Time(self.max_timestamp + 1),
            None => LogStart::Beginning,
        }
    }

    /// Fold a fetched page into the cursor. The timestamp never moves back.
    pub fn advance(&mut self, page: &LogPage) {
        if let Some(newest) = page.events.iter().filter_map(|e| e.timestamp).max() {
            self.max_timestamp = self.max_timestamp.max(newest);
        }
        self.next_token = match &page.next_forward_token {
            Some(token) if !page.events.is_empty() => Some(token.clone()),
            _ => None,
        };
    }

    /// Abandon a half-read page so the next fetch restarts from time
    pub fn reset_token(&mut self) {
        self.next_token = None;
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
