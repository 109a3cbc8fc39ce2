// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub Actions host

use super::{HostAdapter, HostError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes workflow commands to stdout and outputs to the runner's files
#[derive(Clone)]
pub struct ActionsHost {
    out: SharedWriter,
    output_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
}

impl ActionsHost {
    /// Stdout plus `$GITHUB_OUTPUT` and `$GITHUB_STEP_SUMMARY` when set
    pub fn from_env() -> Self {
        let path = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self::new(
            Box::new(std::io::stdout()),
            path("GITHUB_OUTPUT"),
            path("GITHUB_STEP_SUMMARY"),
        )
    }

    pub fn new(
        out: Box<dyn Write + Send>,
        output_file: Option<PathBuf>,
        summary_file: Option<PathBuf>,
    ) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            output_file,
            summary_file,
        }
    }

    fn line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }

    fn command(&self, name: &str, message: &str) {
        self.line(&format!("::{name}::{}", escape_data(message)));
    }
}

impl HostAdapter for ActionsHost {
    fn info(&self, message: &str) {
        self.line(message);
    }

    fn warning(&self, message: &str) {
        self.command("warning", message);
    }

    fn error(&self, message: &str) {
        self.command("error", message);
    }

    fn debug(&self, message: &str) {
        self.command("debug", message);
    }

    fn start_group(&self, name: &str) {
        self.command("group", name);
    }

    fn end_group(&self) {
        self.line("::endgroup::");
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), HostError> {
        match &self.output_file {
            Some(path) => append(path, &file_command(name, value)),
            None => {
                self.line(&format!(
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(value)
                ));
                Ok(())
            }
        }
    }

    fn set_failed(&self, message: &str) {
        self.error(message);
    }

    fn append_summary(&self, markdown: &str) -> Result<(), HostError> {
        match &self.summary_file {
            Some(path) => append(path, markdown),
            None => {
                self.line(markdown);
                Ok(())
            }
        }
    }
}

fn append(path: &Path, content: &str) -> Result<(), HostError> {
    let io_error = |source| HostError::Io {
        target: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)
}

/// `name<<delimiter` block for the outputs file. The delimiter is random so
/// a value cannot terminate the block early.
fn file_command(name: &str, value: &str) -> String {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Escape a workflow command message
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
