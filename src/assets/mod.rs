//! Theme asset registration subsystem.
//!
//! # Data Flow
//! ```text
//! theme.toml [[styles]] / [[scripts]]
//!     → registry.rs (reject duplicate ids)
//!     → probe.rs (resolve host, fetch headers)
//!     → accept only on the expected Content-Type
//!
//! Rendering:
//!     output_styles / output_scripts hooks
//!     → one tag per accepted entry, insertion order
//! ```
//!
//! # Design Decisions
//! - Rejections are silent to callers; they are only logged at debug level
//! - Probing sits behind a trait so rendering code never talks to the network directly
//! - Entries are immutable once accepted

pub mod probe;
pub mod registry;

pub use probe::{ContentTypeProbe, HttpProbe, ProbeError};
pub use registry::{AssetEntry, AssetKind, AssetRegistry};
