//! Behavioral specifications for the cbr CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, step files, and exit codes. No test reaches AWS.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;
#[path = "specs/cli/inputs.rs"]
mod cli_inputs;
