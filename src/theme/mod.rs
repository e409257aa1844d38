//! Theme subsystem.
//!
//! # Data Flow
//! ```text
//! <themes_dir>/<theme>/
//!     theme.css   → metadata.rs (header comment, cached per request)
//!     theme.toml  → manifest.rs (hooks, supports, assets)
//!     *.html      → template.rs (placeholder expansion)
//!     *.md        → markdown renderer, via {{ markdown:name }}
//!
//! context.rs ties these together for one request:
//!     RequestContext { config, hooks, styles, scripts, metadata, output }
//! ```
//!
//! # Design Decisions
//! - All state is per request; nothing theme-related is process-global
//! - Missing or broken theme files degrade to empty output, never to errors
//! - Lifecycle events fire at most once per request

pub mod builtin;
pub mod catalog;
pub mod context;
pub mod manifest;
pub mod metadata;
pub mod template;

pub use catalog::ThemeCatalog;
pub use context::{Phase, RequestContext};
pub use manifest::ThemeManifest;
pub use metadata::ThemeMetadataCache;
