//! Action hook subsystem.
//!
//! # Data Flow
//! ```text
//! Theme setup / built-ins:
//!     add(event, name, callback)
//!     → registry.rs (ordered list per event)
//!
//! Template rendering:
//!     {{ head }} / {{ body_open }} / {{ body_close }}
//!     → fire(ctx, event): snapshot(event)
//!     → invoke each callback with the request context
//! ```
//!
//! # Design Decisions
//! - Registration order is output order; duplicates are kept
//! - Callbacks are typed closures identified by name, so removal and
//!   existence checks work without dynamic name lookup
//! - Firing iterates a snapshot; removals during a firing apply to the next one

pub mod registry;

pub use registry::{fire, Callback, Hook, HookHost, HookRegistry};

/// Well-known lifecycle events fired by page templates.
pub mod events {
    pub const HEAD: &str = "head";
    pub const BODY_OPEN: &str = "body_open";
    pub const BODY_TOP: &str = "body_top";
    pub const BODY_CLOSE: &str = "body_close";
    pub const BODY_BOTTOM: &str = "body_bottom";
    pub const BODY_CLASS: &str = "body_class";
}
