//! Action input specs

use crate::prelude::*;

#[test]
fn project_name_is_read_from_input_variable() {
    let step = Step::new();

    // Gets past the project check and stops at AWS configuration
    step.cbr()
        .env("INPUT_PROJECTNAME", "app")
        .fails()
        .stdout_has("::error::AWS region is not configured");
}

#[test]
fn boolean_inputs_reject_other_words() {
    let step = Step::new();

    step.cbr()
        .env("INPUT_PROJECTNAME", "app")
        .env("INPUT_RUNBATCH", "maybe")
        .rejected()
        .stderr_has("--run-batch");
}

#[test]
fn interval_inputs_must_be_numbers() {
    let step = Step::new();

    step.cbr()
        .args(&["--project-name", "app", "--build-status-interval", "fast"])
        .rejected()
        .stderr_has("--build-status-interval");
}

#[test]
fn batch_run_fails_cleanly_when_endpoint_is_down() {
    let step = Step::new();

    step.cbr_unreachable()
        .args(&["--project-name", "app", "--run-batch", "true"])
        .fails()
        .stdout_has("::error::request failed")
        .stdout_lacks("::set-output");
}
