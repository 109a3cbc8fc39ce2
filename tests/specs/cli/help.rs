//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_every_input() {
    let step = Step::new();

    let flags = [
        "--project-name",
        "--build-status-interval",
        "--logs-update-interval",
        "--display-build-logs",
        "--wait-to-build-end",
        "--redirect-service-url",
        "--run-batch",
    ];
    flags.iter().fold(step.cbr().args(&["--help"]).passes(), |run, flag| {
        run.stdout_has(flag)
    });
}

#[test]
fn help_names_input_variables() {
    let step = Step::new();

    step.cbr()
        .args(&["--help"])
        .passes()
        .stdout_has("INPUT_PROJECTNAME")
        .stdout_has("INPUT_RUNBATCH");
}

#[test]
fn version_prints_binary_name() {
    let step = Step::new();

    step.cbr().args(&["--version"]).passes().stdout_has("cbr");
}
