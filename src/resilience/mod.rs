//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Launching the sync tool:
//!     → retries.rs (spawn, on failure wait and spawn again)
//!     → backoff.rs (exponential delay + jitter between attempts)
//! ```
//!
//! # Design Decisions
//! - No timeout on the child; it runs until it exits
//! - No retry of a child that started and failed

pub mod backoff;
pub mod retries;

pub use retries::{retry_launch, LaunchFailure};
