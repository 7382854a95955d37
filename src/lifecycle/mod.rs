//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve working dir → Verify → Enter → Grace delay
//!
//! Exit (pause.rs):
//!     Child finished → optional hold-open → exit with child's code
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then directory, then delay, then launch
//! - The hold-open only happens on an interactive console

pub mod pause;
pub mod startup;

pub use pause::pause_on_exit;
pub use startup::{enter_working_dir, executable_dir, grace_delay, resolve_working_dir};
