// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CloudWatch Logs adapter

use super::{LogError, LogService};
use crate::aws::{AwsClient, AwsError, AwsService};
use async_trait::async_trait;
use cbr_core::{LogPage, LogQuery, LogStart};
use serde_json::{json, Value};

const GET_LOG_EVENTS: &str = "Logs_20140328.GetLogEvents";

/// Log service backed by the CloudWatch Logs JSON API
#[derive(Clone)]
pub struct CloudWatchLogsAdapter {
    client: AwsClient,
}

impl CloudWatchLogsAdapter {
    pub fn new(client: AwsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogService for CloudWatchLogsAdapter {
    async fn get_log_events(&self, query: &LogQuery) -> Result<LogPage, LogError> {
        let response = self
            .client
            .call(AwsService::Logs, GET_LOG_EVENTS, request_body(query))
            .await
            .map_err(classify)?;
        serde_json::from_value(response).map_err(|e| LogError::Other(e.to_string()))
    }
}

/// `GetLogEvents` request. Reads always run forward from the head; a
/// continuation token replaces the time bound.
fn request_body(query: &LogQuery) -> Value {
    let mut body = json!({
        "logGroupName": query.target.group,
        "logStreamName": query.target.stream,
        "limit": query.limit,
        "startFromHead": true,
    });
    match &query.start {
        LogStart::Beginning => {}
        LogStart::Time(ms) => body["startTime"] = json!(ms),
        LogStart::Token(token) => body["nextToken"] = json!(token),
    }
    body
}

fn classify(error: AwsError) -> LogError {
    match error.code() {
        Some("ResourceNotFoundException") => LogError::StreamNotFound(error.to_string()),
        Some("AccessDeniedException") => LogError::AccessDenied(error.to_string()),
        _ => LogError::Other(error.to_string()),
    }
}

#[cfg(test)]
#[path = "cloudwatch_tests.rs"]
mod tests;
