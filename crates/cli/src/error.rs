// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use cbr_adapters::AwsError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// AWS settings could not be read from the environment
    pub fn aws_config(err: AwsError) -> Self {
        match err {
            AwsError::MissingRegion => CliError::new("AWS region is not configured")
                .with_context("Neither AWS_REGION nor AWS_DEFAULT_REGION is set")
                .with_suggestion("Run aws-actions/configure-aws-credentials before this step")
                .with_suggestion("Or set AWS_REGION in the step's env"),
            AwsError::MissingCredentials => CliError::new("AWS credentials are not configured")
                .with_context("AWS_ACCESS_KEY_ID or AWS_SECRET_ACCESS_KEY is not set")
                .with_suggestion("Run aws-actions/configure-aws-credentials before this step")
                .with_suggestion("For temporary credentials also export AWS_SESSION_TOKEN"),
            other => CliError::new("Failed to read AWS configuration").with_source(other),
        }
    }

    /// The project name input is blank
    pub fn empty_project_name() -> Self {
        CliError::new("CodeBuild project name is empty")
            .with_context("The projectName input resolved to an empty string")
            .with_suggestion("Set the projectName input: with: { projectName: my-project }")
            .with_suggestion("Or pass --project-name <NAME>")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if let Some(source) = &self.source {
            writeln!(f, "  caused by: {source}")?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
