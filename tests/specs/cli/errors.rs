//! Configuration error specs

use crate::prelude::*;

#[test]
fn missing_project_name_is_rejected() {
    let step = Step::new();

    step.cbr().rejected().stderr_has("--project-name");
}

#[test]
fn blank_project_name_fails_the_step() {
    let step = Step::new();

    step.cbr()
        .args(&["--project-name", "  "])
        .fails()
        .stderr_has("error: CodeBuild project name is empty")
        .stdout_has("::error::CodeBuild project name is empty");
}

#[test]
fn missing_region_fails_with_suggestions() {
    let step = Step::new();

    step.cbr()
        .args(&["--project-name", "app"])
        .fails()
        .stderr_has("error: AWS region is not configured")
        .stderr_has("suggestions:")
        .stdout_has("::error::AWS region is not configured");
}

#[test]
fn missing_credentials_fail_the_step() {
    let step = Step::new();

    step.cbr()
        .args(&["--project-name", "app"])
        .env("AWS_REGION", "eu-west-1")
        .fails()
        .stderr_has("error: AWS credentials are not configured")
        .stdout_has("::error::AWS credentials are not configured");
}

#[test]
fn unreachable_endpoint_fails_without_outputs() {
    let step = Step::new();

    step.cbr_unreachable()
        .args(&["--project-name", "app"])
        .fails()
        .stdout_has("::error::request failed");

    assert_eq!(step.read(&step.output_file()), "");
    assert_eq!(step.read(&step.summary_file()), "");
}
