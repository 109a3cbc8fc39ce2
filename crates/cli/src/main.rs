// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! cbr - run an AWS CodeBuild job from a CI step and follow it to the end

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod error;
mod run;
mod summary;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tokio::signal::unix::{signal, SignalKind};

use crate::error::CliError;
use crate::summary::ConsoleLinks;
use cbr_adapters::{
    ActionsHost, AwsClient, AwsConfig, CloudWatchLogsAdapter, CodeBuildAdapter, HostAdapter,
    TracedBuildService, TracedLogService,
};
use cbr_core::RunOptions;
use cbr_engine::{BatchBuild, CancellationController, InterruptHandle, RuntimeDeps, SingleBuild};

#[derive(Parser, Debug)]
#[command(
    name = "cbr",
    version,
    about = "Start an AWS CodeBuild job, stream its logs, and wait for the result"
)]
struct Cli {
    /// CodeBuild project to start
    #[arg(long, env = "INPUT_PROJECTNAME")]
    project_name: String,

    /// Milliseconds between build status checks
    #[arg(long, env = "INPUT_BUILDSTATUSINTERVAL", default_value_t = 5000)]
    build_status_interval: u64,

    /// Milliseconds between log fetches
    #[arg(long, env = "INPUT_LOGSUPDATEINTERVAL", default_value_t = 5000)]
    logs_update_interval: u64,

    /// Stream CloudWatch logs into the step output
    #[arg(long, env = "INPUT_DISPLAYBUILDLOGS", default_value_t = true, action = ArgAction::Set)]
    display_build_logs: bool,

    /// Wait for the build to finish; otherwise exit once it has started
    #[arg(long, env = "INPUT_WAITTOBUILDEND", default_value_t = true, action = ArgAction::Set)]
    wait_to_build_end: bool,

    /// Base URL used instead of the AWS console in build links
    #[arg(long, env = "INPUT_REDIRECTSERVICEURL")]
    redirect_service_url: Option<String>,

    /// Start a batch build
    #[arg(long, env = "INPUT_RUNBATCH", default_value_t = false, action = ArgAction::Set)]
    run_batch: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            poll_interval: Duration::from_millis(self.build_status_interval),
            logs_poll_interval: Duration::from_millis(self.logs_update_interval),
            wait_for_completion: self.wait_to_build_end,
            show_logs: self.display_build_logs,
            redirect_base_url: self.redirect_service_url.clone(),
            batch: self.run_batch,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let host = ActionsHost::from_env();
    match execute(cli, &host).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_error) => {
                    eprint!("{cli_error}");
                    host.set_failed(&cli_error.message);
                }
                None => host.set_failed(&format!("{e:#}")),
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli, host: &ActionsHost) -> Result<bool> {
    let project_name = cli.project_name.trim();
    if project_name.is_empty() {
        return Err(CliError::empty_project_name().into());
    }

    let aws = AwsConfig::from_env().map_err(CliError::aws_config)?;
    let links = ConsoleLinks::new(aws.region.clone(), cli.redirect_service_url.clone());
    let client = AwsClient::new(aws);
    let deps = RuntimeDeps {
        builds: TracedBuildService::new(CodeBuildAdapter::new(client.clone())),
        logs: TracedLogService::new(CloudWatchLogsAdapter::new(client)),
        host: host.clone(),
    };

    let options = cli.run_options();
    let params = config::start_params_from_env(project_name);
    tracing::debug!(?options, overrides = params.overrides.len(), "starting job");

    let (mut cancel, interrupt) = CancellationController::new();
    tokio::spawn(async move {
        if let Err(e) = forward_signals(interrupt).await {
            tracing::warn!(error = %e, "failed to install signal handlers");
        }
    });

    let outcome = if options.batch {
        run::run_job::<BatchBuild, _, _, _>(deps, options, &params, &mut cancel).await?
    } else {
        run::run_job::<SingleBuild, _, _, _>(deps, options, &params, &mut cancel).await?
    };
    tracing::info!(id = outcome.id(), "job finished");

    Ok(run::report(host, &outcome, &links))
}

/// Turn SIGINT or SIGTERM into a cancellation request
async fn forward_signals(interrupt: InterruptHandle) -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => tracing::info!("received SIGINT"),
        _ = sigterm.recv() => tracing::info!("received SIGTERM"),
    }
    interrupt.interrupt();
    Ok(())
}

/// Diagnostics go to stderr so stdout stays free for workflow commands
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match std::env::var("ACTIONS_STEP_DEBUG").as_deref() {
        Ok("true") => "debug",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
