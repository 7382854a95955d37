//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{RunnerConfig, WorkingDirectory};
use crate::config::validation::{validate_config, ValidationError};

/// Config file looked up next to the executable when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "startup-runner.toml";

pub const ENV_WORKING_DIR: &str = "STARTUP_RUNNER_WORKING_DIR";
pub const ENV_DELAY_SECS: &str = "STARTUP_RUNNER_DELAY_SECS";
pub const ENV_SYNC_PROGRAM: &str = "STARTUP_RUNNER_SYNC_PROGRAM";
pub const ENV_LOG: &str = "STARTUP_RUNNER_LOG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidOverride { var: &'static str, value: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RunnerConfig,

    /// The file the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory relative working-directory paths resolve against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.source.as_deref().and_then(Path::parent)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<RunnerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, `startup-runner.toml` in
/// `exe_dir` is used when present, otherwise defaults. Environment overrides
/// are applied last and the result is validated once.
pub fn resolve_config<F>(
    explicit: Option<&Path>,
    exe_dir: Option<&Path>,
    env: F,
) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => exe_dir
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .filter(|candidate| candidate.is_file()),
    };

    let mut config = match &source {
        Some(path) => read_config(path)?,
        None => RunnerConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(LoadedConfig { config, source })
}

/// Apply `STARTUP_RUNNER_*` overrides on top of a parsed configuration.
pub fn apply_env_overrides<F>(config: &mut RunnerConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = env(ENV_WORKING_DIR).filter(|v| !v.is_empty()) {
        config.working_directory = WorkingDirectory::Path { path: PathBuf::from(dir) };
    }

    if let Some(value) = env(ENV_DELAY_SECS) {
        config.delay_secs = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidOverride { var: ENV_DELAY_SECS, value })?;
    }

    if let Some(program) = env(ENV_SYNC_PROGRAM).filter(|v| !v.is_empty()) {
        config.sync.program = program;
    }

    if let Some(level) = env(ENV_LOG).filter(|v| !v.is_empty()) {
        config.logging.level = level;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = resolve_config(None, Some(dir.path()), env_from(&[])).unwrap();
        assert!(loaded.source.is_none());
        assert!(loaded.base_dir().is_none());
        assert_eq!(loaded.config, RunnerConfig::default());
    }

    #[test]
    fn test_discovers_file_next_to_executable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "delay_secs = 12\n").unwrap();

        let loaded = resolve_config(None, Some(dir.path()), env_from(&[])).unwrap();
        assert_eq!(loaded.config.delay_secs, 12);
        assert_eq!(loaded.base_dir(), Some(dir.path()));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = resolve_config(Some(&missing), None, env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "delay_secs = \"soon\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runner.toml");
        fs::write(&path, "delay_secs = 30\n[sync]\nprogram = \"python\"\n").unwrap();

        let env = env_from(&[
            (ENV_DELAY_SECS, "3"),
            (ENV_WORKING_DIR, "/srv/sync"),
            (ENV_SYNC_PROGRAM, "python3"),
            (ENV_LOG, "debug"),
        ]);
        let loaded = resolve_config(Some(&path), None, env).unwrap();

        assert_eq!(loaded.config.delay_secs, 3);
        assert_eq!(
            loaded.config.working_directory,
            WorkingDirectory::Path { path: PathBuf::from("/srv/sync") }
        );
        assert_eq!(loaded.config.sync.program, "python3");
        assert_eq!(loaded.config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_delay_override() {
        let err = resolve_config(None, None, env_from(&[(ENV_DELAY_SECS, "thirty")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride { var: ENV_DELAY_SECS, .. }
        ));
    }

    #[test]
    fn test_validation_runs_after_overrides() {
        let err = resolve_config(None, None, env_from(&[(ENV_DELAY_SECS, "999999")])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
