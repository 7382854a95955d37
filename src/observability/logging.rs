//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Mirror console output into an append-only log file for unattended runs
//!
//! # Design Decisions
//! - `RUST_LOG` wins over `logging.level`
//! - ANSI colours only on the console layer
//! - A log file that cannot be opened degrades to console-only logging

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Resolve the configured log file against `base`.
pub fn log_file_path(config: &LoggingConfig, base: &Path) -> Option<PathBuf> {
    config.file.as_ref().map(|file| {
        if file.is_absolute() {
            file.clone()
        } else {
            base.join(file)
        }
    })
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// Returns the log file in use, if any. Calling this more than once is a
/// no-op for the later calls.
pub fn init_logging(config: &LoggingConfig, base: &Path) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file = log_file_path(config, base).and_then(|path| match open_log_file(&path) {
        Ok(file) => Some((path, file)),
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {}", path.display(), e);
            None
        }
    });

    let (path, file_layer) = match file {
        Some((path, file)) => (
            Some(path),
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
        ),
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .try_init();

    path
}
