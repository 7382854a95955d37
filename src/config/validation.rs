//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, delays ordered, bounded grace period)
//! - Reject commands and environment entries that cannot be spawned
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RunnerConfig → Result<(), Vec<ValidationError>>
//! - Filesystem checks happen at run time, not here

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{RunnerConfig, WorkingDirectory};

/// Upper bound for the startup grace period.
pub const MAX_DELAY_SECS: u64 = 60 * 60;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("sync.program must not be empty")]
    EmptyProgram,

    #[error("working_directory.path must not be empty")]
    EmptyWorkingDirectory,

    #[error("delay_secs {0} exceeds maximum {max}", max = MAX_DELAY_SECS)]
    DelayTooLong(u64),

    #[error("retry.max_attempts must be at least 1")]
    NoAttempts,

    #[error("retry.base_delay_ms {base} is greater than retry.max_delay_ms {max}")]
    BackoffOrder { base: u64, max: u64 },

    #[error("sync.env key {0:?} is invalid")]
    InvalidEnvKey(String),

    #[error("logging.level {0:?} is not a valid filter")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.sync.program.trim().is_empty() {
        errors.push(ValidationError::EmptyProgram);
    }

    if let WorkingDirectory::Path { path } = &config.working_directory {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyWorkingDirectory);
        }
    }

    if config.delay_secs > MAX_DELAY_SECS {
        errors.push(ValidationError::DelayTooLong(config.delay_secs));
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::NoAttempts);
    }

    if config.retry.base_delay_ms > config.retry.max_delay_ms {
        errors.push(ValidationError::BackoffOrder {
            base: config.retry.base_delay_ms,
            max: config.retry.max_delay_ms,
        });
    }

    for key in config.sync.env.keys() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            errors.push(ValidationError::InvalidEnvKey(key.clone()));
        }
    }

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
