//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! --config / STARTUP_RUNNER_CONFIG / startup-runner.toml next to the exe
//!     → loader.rs (parse & deserialize, apply STARTUP_RUNNER_* overrides)
//!     → validation.rs (semantic checks)
//!     → RunnerConfig (validated, immutable)
//!     → read once at startup, handed to the runner
//! ```
//!
//! # Design Decisions
//! - Config is read once; there is no reload
//! - All fields have defaults so an empty or missing file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, LoadedConfig};
pub use schema::LoggingConfig;
pub use schema::RetryConfig;
pub use schema::RunnerConfig;
pub use schema::SyncCommandConfig;
pub use schema::WorkingDirectory;
