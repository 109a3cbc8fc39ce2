// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AWS Signature Version 4 for JSON protocol requests
//!
//! Only the shape used by this client is supported: `POST /` with no query
//! string and a fixed header set.

use super::{AwsError, Credentials};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Inputs of one signature
pub struct SigningRequest<'a> {
    pub host: &'a str,
    pub target: &'a str,
    pub content_type: &'a str,
    pub payload: &'a [u8],
    pub service: &'a str,
    pub region: &'a str,
    pub credentials: &'a Credentials,
    pub time: DateTime<Utc>,
}

/// Headers to attach to the signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

pub fn sign(request: &SigningRequest<'_>) -> Result<SignedHeaders, AwsError> {
    let amz_date = request.time.format("%Y%m%dT%H%M%SZ").to_string();
    let date = request.time.format("%Y%m%d").to_string();
    let scope = format!(
        "{}/{}/{}/aws4_request",
        date, request.region, request.service
    );

    let mut headers = vec![
        ("content-type", request.content_type),
        ("host", request.host),
        ("x-amz-date", amz_date.as_str()),
    ];
    if let Some(token) = &request.credentials.session_token {
        headers.push(("x-amz-security-token", token.as_str()));
    }
    headers.push(("x-amz-target", request.target));

    let canonical = canonical_request(&headers, request.payload);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical.as_bytes()))
    );

    let key = signing_key(
        &request.credentials.secret_access_key,
        &date,
        request.region,
        request.service,
    )?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
        request.credentials.access_key_id,
        signed_header_names(&headers),
    );

    Ok(SignedHeaders {
        amz_date,
        authorization,
    })
}

/// Derive the per-day signing key
pub fn signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, AwsError> {
    let k_date = hmac(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// Headers must already be lowercase and sorted by name
fn canonical_request(headers: &[(&str, &str)], payload: &[u8]) -> String {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect();
    format!(
        "POST\n/\n\n{canonical_headers}\n{}\n{}",
        signed_header_names(headers),
        hex::encode(Sha256::digest(payload))
    )
}

fn signed_header_names(headers: &[(&str, &str)]) -> String {
    headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";")
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AwsError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| AwsError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
#[path = "sigv4_tests.rs"]
mod tests;
