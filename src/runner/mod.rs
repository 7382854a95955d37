//! Startup runner.
//!
//! # Data Flow
//! ```text
//! RunnerConfig + resolved working dir
//!     → verify directory (PathNotFound / NotADirectory, before any wait)
//!     → grace delay (never skipped)
//!     → spawn sync tool (bounded retry on spawn failure only)
//!     → wait, no timeout
//!     → RunOutcome or RunnerError carrying the child's code
//! ```

pub mod process;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::RunnerConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::lifecycle::startup::{grace_delay, verify_working_dir};
use crate::resilience::retry_launch;

pub use process::{ChildExit, SyncProcess};

/// A run whose sync tool exited with code 0.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    /// Spawn attempts needed to start the child.
    pub attempts: u32,
    /// Time spent in the grace delay.
    pub waited: Duration,
    pub exit: ChildExit,
}

/// Runs the sync tool once, after the startup grace period.
#[derive(Debug, Clone)]
pub struct StartupRunner {
    config: RunnerConfig,
    working_dir: PathBuf,
}

impl StartupRunner {
    pub fn new(config: RunnerConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            working_dir: working_dir.into(),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Execute one run under a fresh run id.
    pub async fn run(&self) -> RunnerResult<RunOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id);
        self.run_with_id(run_id).instrument(span).await
    }

    async fn run_with_id(&self, run_id: Uuid) -> RunnerResult<RunOutcome> {
        let program = self.config.sync.program.clone();

        verify_working_dir(&self.working_dir).inspect_err(|e| {
            tracing::error!(error = %e, "Working directory check failed");
        })?;

        tracing::info!(
            working_dir = %self.working_dir.display(),
            command = %self.config.sync.display(),
            delay_secs = self.config.delay_secs,
            "Startup run begins"
        );

        let waited = grace_delay(self.config.delay()).await;

        let sync = SyncProcess::new(self.config.sync.clone(), &self.working_dir);
        let (child, attempts) = retry_launch(&self.config.retry, |attempt| {
            tracing::debug!(attempt, "Launching sync tool");
            std::future::ready(sync.spawn())
        })
        .await
        .map_err(|failure| RunnerError::SubprocessLaunch {
            program: program.clone(),
            attempts: failure.attempts,
            source: failure.last_error,
        })
        .inspect_err(|e| tracing::error!(error = %e, "Sync tool could not be launched"))?;

        let exit = process::wait_for_exit(child)
            .await
            .map_err(|source| RunnerError::SubprocessWait {
                program: program.clone(),
                source,
            })?;

        match exit {
            ChildExit::Code(0) => {
                tracing::info!(attempts, waited_ms = waited.as_millis() as u64, "Sync tool finished");
                Ok(RunOutcome {
                    run_id,
                    attempts,
                    waited,
                    exit,
                })
            }
            ChildExit::Code(code) => {
                tracing::error!(code, "Sync tool exited with failure");
                Err(RunnerError::SubprocessFailure { program, code })
            }
            ChildExit::Terminated => {
                tracing::error!("Sync tool terminated without an exit code");
                Err(RunnerError::SubprocessTerminated { program })
            }
        }
    }
}
