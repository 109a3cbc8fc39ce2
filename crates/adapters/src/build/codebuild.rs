// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AWS CodeBuild adapter

use super::{BuildError, BuildService};
use crate::aws::{AwsClient, AwsError, AwsService};
use async_trait::async_trait;
use cbr_core::{Build, BuildBatch, StartParams};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

const TARGET_PREFIX: &str = "CodeBuild_20161006";

/// Build service backed by the CodeBuild JSON API
#[derive(Clone)]
pub struct CodeBuildAdapter {
    client: AwsClient,
}

impl CodeBuildAdapter {
    pub fn new(client: AwsClient) -> Self {
        Self { client }
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: Value,
    ) -> Result<T, BuildError> {
        let target = format!("{TARGET_PREFIX}.{operation}");
        let response = self
            .client
            .call(AwsService::CodeBuild, &target, body)
            .await?;
        decode(response)
    }
}

#[derive(Debug, Deserialize)]
struct BuildOutput {
    build: Option<Build>,
}

#[derive(Debug, Deserialize)]
struct BuildsOutput {
    #[serde(default)]
    builds: Vec<Build>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchOutput {
    build_batch: Option<BuildBatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchesOutput {
    #[serde(default)]
    build_batches: Vec<BuildBatch>,
}

fn decode<T: DeserializeOwned>(response: Value) -> Result<T, BuildError> {
    serde_json::from_value(response)
        .map_err(|e| BuildError::Aws(AwsError::InvalidResponse(e.to_string())))
}

fn params_body(params: &StartParams) -> Result<Value, BuildError> {
    serde_json::to_value(params)
        .map_err(|e| BuildError::Remote(format!("invalid start parameters: {e}")))
}

#[async_trait]
impl BuildService for CodeBuildAdapter {
    async fn start_build(&self, params: &StartParams) -> Result<Option<Build>, BuildError> {
        let output: BuildOutput = self.invoke("StartBuild", params_body(params)?).await?;
        Ok(output.build)
    }

    async fn get_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        let output: BuildsOutput = self
            .invoke("BatchGetBuilds", json!({ "ids": [id] }))
            .await?;
        Ok(output.builds.into_iter().find(|b| b.id == id))
    }

    async fn stop_build(&self, id: &str) -> Result<Option<Build>, BuildError> {
        let output: BuildOutput = self.invoke("StopBuild", json!({ "id": id })).await?;
        Ok(output.build)
    }

    async fn start_build_batch(
        &self,
        params: &StartParams,
    ) -> Result<Option<BuildBatch>, BuildError> {
        let output: BatchOutput = self
            .invoke("StartBuildBatch", params_body(params)?)
            .await?;
        Ok(output.build_batch)
    }

    async fn get_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        let output: BatchesOutput = self
            .invoke("BatchGetBuildBatches", json!({ "ids": [id] }))
            .await?;
        Ok(output.build_batches.into_iter().find(|b| b.id == id))
    }

    async fn stop_build_batch(&self, id: &str) -> Result<Option<BuildBatch>, BuildError> {
        let output: BatchOutput = self
            .invoke("StopBuildBatch", json!({ "id": id }))
            .await?;
        Ok(output.build_batch)
    }
}

#[cfg(test)]
#[path = "codebuild_tests.rs"]
mod tests;
