//! Login-triggered task runner library.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod runner;

pub use config::RunnerConfig;
pub use error::{RunnerError, RunnerResult};
pub use runner::{RunOutcome, StartupRunner};
