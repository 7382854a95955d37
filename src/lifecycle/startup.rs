//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the working directory from config
//! - Verify it before anything else happens
//! - Hold the fixed grace period before launching
//!
//! # Design Decisions
//! - Fail fast: a bad directory is reported before the delay is spent
//! - The delay is never shortened or interrupted

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::WorkingDirectory;
use crate::error::{RunnerError, RunnerResult};

/// Directory containing the running executable.
pub fn executable_dir() -> RunnerResult<PathBuf> {
    let exe = std::env::current_exe().map_err(RunnerError::ExecutableDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        RunnerError::ExecutableDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

/// Turn the configured working directory into a concrete path.
///
/// `base` is where relative paths resolve (the config file's directory, or
/// the current directory). Nothing is checked on disk here.
pub fn resolve_working_dir(
    working_directory: &WorkingDirectory,
    base: &Path,
    exe_dir: &Path,
) -> PathBuf {
    match working_directory {
        WorkingDirectory::ExecutableDir => exe_dir.to_path_buf(),
        WorkingDirectory::Path { path } if path.is_absolute() => path.clone(),
        WorkingDirectory::Path { path } => base.join(path),
    }
}

/// Check that `path` exists and is a directory.
pub fn verify_working_dir(path: &Path) -> RunnerResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(RunnerError::NotADirectory { path: path.to_path_buf() }),
        Err(_) => Err(RunnerError::PathNotFound { path: path.to_path_buf() }),
    }
}

/// Verify `path` and make it the process working directory.
pub fn enter_working_dir(path: &Path) -> RunnerResult<()> {
    verify_working_dir(path)?;
    std::env::set_current_dir(path).map_err(|source| RunnerError::ChangeDir {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Entered working directory");
    Ok(())
}

/// Wait out the startup grace period. Returns the time actually waited.
pub async fn grace_delay(delay: Duration) -> Duration {
    let started = Instant::now();
    if !delay.is_zero() {
        tracing::info!(delay_secs = delay.as_secs(), "Waiting for network to settle");
        tokio::time::sleep(delay).await;
    }
    started.elapsed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_resolve_variants() {
        let base = Path::new("/etc/runner");
        let exe = Path::new("/opt/runner/bin");

        assert_eq!(
            resolve_working_dir(&WorkingDirectory::ExecutableDir, base, exe),
            PathBuf::from("/opt/runner/bin")
        );
        assert_eq!(
            resolve_working_dir(&WorkingDirectory::Path { path: "/srv/sync".into() }, base, exe),
            PathBuf::from("/srv/sync")
        );
        assert_eq!(
            resolve_working_dir(&WorkingDirectory::Path { path: "sync".into() }, base, exe),
            PathBuf::from("/etc/runner/sync")
        );
    }

    #[test]
    fn test_verify_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(matches!(
            verify_working_dir(&missing),
            Err(RunnerError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_verify_file_is_not_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sync_playlists.py");
        std::fs::write(&file, "print('hi')").unwrap();
        assert!(matches!(
            verify_working_dir(&file),
            Err(RunnerError::NotADirectory { .. })
        ));
        assert!(verify_working_dir(dir.path()).is_ok());
    }

    #[test]
    fn test_executable_dir_exists() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_grace_delay_waits_at_least_delay() {
        let waited = grace_delay(Duration::from_millis(150)).await;
        assert!(waited >= Duration::from_millis(150));
    }
}
