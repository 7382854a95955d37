//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, lifecycle, resilience, runner
//!     → logging.rs (structured log events via tracing)
//!
//! Consumers:
//!     → console (stderr, inherited by the login session)
//!     → optional append-only log file
//! ```
//!
//! # Design Decisions
//! - Every run carries a UUID run id on its span
//! - The sync tool's own output is inherited, never captured

pub mod logging;

pub use logging::init_logging;
