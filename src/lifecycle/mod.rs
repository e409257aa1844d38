//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server drains, watcher task exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; every long-running task subscribes
//! - Configuration reload is file-driven (see config::watcher), not signal-driven

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
