//! Error taxonomy and process exit codes.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Exit code for an unreadable or invalid configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code when the working directory does not exist or is not a directory.
pub const EXIT_WORKING_DIR: u8 = 3;
/// Exit code when the sync tool could not be started.
pub const EXIT_LAUNCH: u8 = 4;
/// Exit code when the sync tool ended without an exit code.
pub const EXIT_TERMINATED: u8 = 5;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured working directory does not exist.
    #[error("working directory {} does not exist", .path.display())]
    PathNotFound { path: PathBuf },

    /// The configured working directory exists but is not a directory.
    #[error("working directory {} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// The runner's own location could not be determined.
    #[error("cannot locate the runner executable: {0}")]
    ExecutableDir(#[source] std::io::Error),

    /// Changing into the working directory failed.
    #[error("failed to enter {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sync tool was not found or failed to start.
    #[error("failed to launch `{program}` after {attempts} attempt(s): {source}")]
    SubprocessLaunch {
        program: String,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the started sync tool failed.
    #[error("failed to wait for `{program}`: {source}")]
    SubprocessWait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The sync tool exited with a non-zero code.
    #[error("`{program}` exited with code {code}")]
    SubprocessFailure { program: String, code: i32 },

    /// The sync tool ended without an exit code (killed by a signal).
    #[error("`{program}` was terminated without an exit code")]
    SubprocessTerminated { program: String },
}

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

impl RunnerError {
    /// Process exit code for this error.
    ///
    /// A failing child propagates its own code. Codes outside 1..=255 (as
    /// Windows can produce) collapse to 1 so failure is never reported as 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunnerError::Config(_) => EXIT_CONFIG,
            RunnerError::PathNotFound { .. }
            | RunnerError::NotADirectory { .. }
            | RunnerError::ExecutableDir(_)
            | RunnerError::ChangeDir { .. } => EXIT_WORKING_DIR,
            RunnerError::SubprocessLaunch { .. } => EXIT_LAUNCH,
            RunnerError::SubprocessWait { .. } | RunnerError::SubprocessTerminated { .. } => {
                EXIT_TERMINATED
            }
            RunnerError::SubprocessFailure { code, .. } => match u8::try_from(*code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;

    fn failure(code: i32) -> RunnerError {
        RunnerError::SubprocessFailure { program: "python".into(), code }
    }

    #[test]
    fn test_child_code_propagates() {
        assert_eq!(failure(7).exit_code(), 7);
        assert_eq!(failure(255).exit_code(), 255);
    }

    #[test]
    fn test_out_of_range_child_code_is_still_failure() {
        assert_eq!(failure(-1).exit_code(), 1);
        assert_eq!(failure(256).exit_code(), 1);
        assert_eq!(failure(0).exit_code(), 1);
    }

    #[test]
    fn test_codes_are_distinct() {
        let missing = RunnerError::PathNotFound { path: "/nope".into() };
        let config = RunnerError::Config(ConfigError::Validation(vec![ValidationError::NoAttempts]));
        let launch = RunnerError::SubprocessLaunch {
            program: "python".into(),
            attempts: 1,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(missing.exit_code(), EXIT_WORKING_DIR);
        assert_eq!(config.exit_code(), EXIT_CONFIG);
        assert_eq!(launch.exit_code(), EXIT_LAUNCH);
        assert!(missing.to_string().contains("/nope"));
    }
}
