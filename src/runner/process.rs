//! Sync tool child process.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};

use crate::config::SyncCommandConfig;

/// How the sync tool ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Exited normally with this code.
    Code(i32),
    /// Ended without an exit code (killed by a signal).
    Terminated,
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildExit::Code(code),
            None => ChildExit::Terminated,
        }
    }
}

impl ChildExit {
    pub fn success(self) -> bool {
        self == ChildExit::Code(0)
    }
}

/// A prepared invocation of the sync tool.
#[derive(Debug, Clone)]
pub struct SyncProcess {
    command: SyncCommandConfig,
    working_dir: PathBuf,
}

impl SyncProcess {
    pub fn new(command: SyncCommandConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            working_dir: working_dir.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.command.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .envs(&self.command.env)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Start the child, sharing the runner's console.
    pub fn spawn(&self) -> std::io::Result<Child> {
        let child = self.command().spawn()?;
        tracing::info!(
            pid = child.id(),
            command = %self.command.display(),
            "Sync tool started"
        );
        Ok(child)
    }
}

/// Block until `child` exits and capture how it ended.
pub async fn wait_for_exit(mut child: Child) -> std::io::Result<ChildExit> {
    let status = child.wait().await?;
    Ok(ChildExit::from(status))
}
