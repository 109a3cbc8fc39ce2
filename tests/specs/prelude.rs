//! Shared helpers for CLI specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated CI step: empty environment plus output and summary files
pub struct Step {
    dir: TempDir,
}

impl Step {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("output"), "").unwrap();
        std::fs::write(dir.path().join("summary"), "").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_file(&self) -> PathBuf {
        self.path().join("output")
    }

    pub fn summary_file(&self) -> PathBuf {
        self.path().join("summary")
    }

    pub fn read(&self, file: &Path) -> String {
        std::fs::read_to_string(file).unwrap()
    }

    /// `cbr` with a cleared environment pointed at this step's files
    pub fn cbr(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("cbr").unwrap();
        cmd.env_clear()
            .current_dir(self.path())
            .env("GITHUB_OUTPUT", self.output_file())
            .env("GITHUB_STEP_SUMMARY", self.summary_file());
        CliBuilder { cmd }
    }

    /// `cbr` with fake credentials for a local endpoint nothing listens on
    pub fn cbr_unreachable(&self) -> CliBuilder {
        self.cbr()
            .env("AWS_REGION", "us-east-1")
            .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
            .env("AWS_SECRET_ACCESS_KEY", "secret")
            .env("AWS_ENDPOINT_URL", "http://127.0.0.1:9")
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    /// Exit code 1: the step failed
    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().code(1))
    }

    /// Exit code 2: the arguments were rejected
    pub fn rejected(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().code(2))
    }
}

pub struct RunAssert(Assert);

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(predicate::str::contains(expected)))
    }
}
