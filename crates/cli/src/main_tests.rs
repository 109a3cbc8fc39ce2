// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;

#[test]
fn command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn options_default_to_action_defaults() {
    let cli = Cli::try_parse_from(["cbr", "--project-name", "app"]).unwrap();

    assert_eq!(cli.project_name, "app");
    assert_eq!(cli.run_options(), RunOptions::default());
}

#[test]
fn boolean_inputs_take_explicit_values() {
    let cli = Cli::try_parse_from([
        "cbr",
        "--project-name",
        "app",
        "--display-build-logs",
        "false",
        "--wait-to-build-end",
        "false",
        "--run-batch",
        "true",
        "--build-status-interval",
        "1000",
        "--redirect-service-url",
        "https://sso.example.com",
    ])
    .unwrap();
    let options = cli.run_options();

    assert!(!options.show_logs);
    assert!(!options.wait_for_completion);
    assert!(options.batch);
    assert_eq!(options.poll_interval, Duration::from_millis(1000));
    assert_eq!(options.logs_poll_interval, Duration::from_millis(5000));
    assert_eq!(
        options.redirect_base_url.as_deref(),
        Some("https://sso.example.com")
    );
}

#[test]
fn interval_must_be_a_number() {
    let result = Cli::try_parse_from([
        "cbr",
        "--project-name",
        "app",
        "--logs-update-interval",
        "soon",
    ]);
    assert!(result.is_err());
}
