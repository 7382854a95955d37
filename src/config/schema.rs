//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runner.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default grace period before launching the sync tool.
pub const DEFAULT_DELAY_SECS: u64 = 30;

/// Root configuration for the startup runner.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Grace period in seconds, waited before every launch.
    pub delay_secs: u64,

    /// Hold the console open after the child exits.
    pub pause_on_exit: bool,

    /// Directory to change into before launching the sync tool.
    pub working_directory: WorkingDirectory,

    /// The external sync command.
    pub sync: SyncCommandConfig,

    /// Launch retry configuration.
    pub retry: RetryConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY_SECS,
            pause_on_exit: false,
            working_directory: WorkingDirectory::default(),
            sync: SyncCommandConfig::default(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

/// How the working directory is chosen.
///
/// ```toml
/// [working_directory]
/// kind = "path"
/// path = "C:/Users/me/playlist-sync"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkingDirectory {
    /// The directory that contains the runner executable.
    #[default]
    ExecutableDir,

    /// An explicit path. Relative paths resolve against the config file's
    /// directory, or the current directory when no file was loaded.
    Path { path: PathBuf },
}

/// External sync command.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncCommandConfig {
    /// Program looked up on PATH (or an explicit path).
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,

    /// Extra environment variables for the child.
    pub env: BTreeMap<String, String>,
}

impl Default for SyncCommandConfig {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["sync_playlists.py".to_string()],
            env: BTreeMap::new(),
        }
    }
}

impl SyncCommandConfig {
    /// Program and arguments joined for display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Retry configuration for launching the sync tool.
///
/// Only spawn failures are retried; a child that started is never relaunched.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    /// Total launch attempts, including the first. 1 disables retries.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub level: String,

    /// Optional log file, appended to on every run. Relative paths resolve
    /// against the working directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
