//! Shared utilities for end-to-end runner tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// A scratch project directory with a stub sync script and a config file.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// Create a project whose stub sync tool records each launch in
    /// `launches.log` and then exits with `exit_code`.
    pub fn with_stub(exit_code: i32) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("echo launched >> launches.log\nexit {exit_code}\n");
        fs::write(dir.path().join("sync_stub.sh"), script).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a config pointing at this project and return its path.
    pub fn write_config(&self, delay_secs: u64, extra: &str) -> PathBuf {
        let config = format!(
            "delay_secs = {delay_secs}\n\n\
             [working_directory]\nkind = \"path\"\npath = {path:?}\n\n\
             [sync]\nprogram = \"sh\"\nargs = [\"sync_stub.sh\"]\n\n{extra}",
            path = self.path().display().to_string(),
        );
        let path = self.path().join("startup-runner.toml");
        fs::write(&path, config).unwrap();
        path
    }

    pub fn launches(&self) -> usize {
        fs::read_to_string(self.path().join("launches.log"))
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }
}

/// Run the runner binary with `args`, returning its output and wall time.
#[allow(dead_code)]
pub fn run_runner(args: &[&str]) -> (Output, Duration) {
    let started = Instant::now();
    let output = Command::new(env!("CARGO_BIN_EXE_startup-runner"))
        .args(args)
        .env_remove("STARTUP_RUNNER_CONFIG")
        .env_remove("STARTUP_RUNNER_WORKING_DIR")
        .env_remove("STARTUP_RUNNER_DELAY_SECS")
        .env_remove("STARTUP_RUNNER_SYNC_PROGRAM")
        .env_remove("STARTUP_RUNNER_LOG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    (output, started.elapsed())
}
