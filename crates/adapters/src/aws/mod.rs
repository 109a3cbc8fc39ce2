// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal AWS JSON 1.1 protocol client
//!
//! CodeBuild and CloudWatch Logs both speak the same protocol: a signed
//! `POST /` whose operation is named by the `X-Amz-Target` header and whose
//! request and response bodies are JSON.

pub mod sigv4;

use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from AWS calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AwsError {
    #[error("AWS region is not configured")]
    MissingRegion,
    #[error("AWS credentials are not configured")]
    MissingCredentials,
    #[error("request signing failed: {0}")]
    Signing(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("{code}: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AwsError {
    /// Error code reported by the service, e.g. `AccessDeniedException`
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Services this client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwsService {
    CodeBuild,
    Logs,
}

impl AwsService {
    /// Endpoint prefix and SigV4 service name
    pub fn name(self) -> &'static str {
        match self {
            AwsService::CodeBuild => "codebuild",
            AwsService::Logs => "logs",
        }
    }
}

/// Static credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Region, credentials, and an optional endpoint override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    pub credentials: Credentials,
    /// Replaces `https://<service>.<region>.amazonaws.com` for every service
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Read the standard `AWS_*` environment variables
    pub fn from_env() -> Result<Self, AwsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AwsError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = var("AWS_REGION")
            .or_else(|| var("AWS_DEFAULT_REGION"))
            .ok_or(AwsError::MissingRegion)?;
        let access_key_id = var("AWS_ACCESS_KEY_ID").ok_or(AwsError::MissingCredentials)?;
        let secret_access_key =
            var("AWS_SECRET_ACCESS_KEY").ok_or(AwsError::MissingCredentials)?;

        Ok(Self {
            region,
            credentials: Credentials {
                access_key_id,
                secret_access_key,
                session_token: var("AWS_SESSION_TOKEN"),
            },
            endpoint_url: var("AWS_ENDPOINT_URL"),
        })
    }

    /// Base URL for a service
    pub fn endpoint(&self, service: AwsService) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}.amazonaws.com", service.name(), self.region),
        }
    }
}

/// Signed JSON client shared by the CodeBuild and CloudWatch Logs adapters
#[derive(Clone)]
pub struct AwsClient {
    agent: ureq::Agent,
    config: Arc<AwsConfig>,
}

impl AwsClient {
    pub fn new(config: AwsConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(HTTP_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AwsConfig {
        &self.config
    }

    /// Invoke `target` (e.g. `CodeBuild_20161006.StartBuild`) with a JSON body.
    ///
    /// The blocking HTTP call runs on tokio's blocking pool.
    pub async fn call(
        &self,
        service: AwsService,
        target: &str,
        body: Value,
    ) -> Result<Value, AwsError> {
        let client = self.clone();
        let target = target.to_string();
        tokio::task::spawn_blocking(move || client.call_blocking(service, &target, &body))
            .await
            .map_err(|e| AwsError::Transport(e.to_string()))?
    }

    fn call_blocking(
        &self,
        service: AwsService,
        target: &str,
        body: &Value,
    ) -> Result<Value, AwsError> {
        let endpoint = self.config.endpoint(service);
        let host = host_of(&endpoint).to_string();
        let payload =
            serde_json::to_vec(body).map_err(|e| AwsError::InvalidResponse(e.to_string()))?;

        let signed = sigv4::sign(&sigv4::SigningRequest {
            host: &host,
            target,
            content_type: CONTENT_TYPE,
            payload: &payload,
            service: service.name(),
            region: &self.config.region,
            credentials: &self.config.credentials,
            time: Utc::now(),
        })?;

        let mut request = self
            .agent
            .post(format!("{endpoint}/"))
            .header("content-type", CONTENT_TYPE)
            .header("x-amz-target", target)
            .header("x-amz-date", &signed.amz_date)
            .header("authorization", &signed.authorization);
        if let Some(token) = &self.config.credentials.session_token {
            request = request.header("x-amz-security-token", token);
        }

        let mut response = request
            .send(&payload[..])
            .map_err(|e| AwsError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AwsError::Transport(e.to_string()))?;

        if status >= 400 {
            return Err(parse_service_error(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&text).map_err(|e| AwsError::InvalidResponse(e.to_string()))
    }
}

/// Authority part of an endpoint URL
fn host_of(endpoint: &str) -> &str {
    let rest = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint);
    rest.split('/').next().unwrap_or(rest)
}

/// Decode a JSON protocol error body.
///
/// `__type` may carry a namespace (`com.amazonaws.logs#Code`) or a trailing
/// documentation link (`Code:http://...`); both are stripped.
pub fn parse_service_error(status: u16, body: &str) -> AwsError {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        json.as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let code = field("__type")
        .or_else(|| field("code"))
        .map(|raw| {
            let code = raw.rsplit('#').next().unwrap_or(&raw);
            code.split(':').next().unwrap_or(code).to_string()
        })
        .unwrap_or_else(|| format!("Http{status}"));
    let message = field("message")
        .or_else(|| field("Message"))
        .unwrap_or_else(|| body.trim().to_string());

    AwsError::Service {
        status,
        code,
        message,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
