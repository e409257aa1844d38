//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path (e.g. "/blog/first-post")
//!     → router.rs prepare (baseline hooks, theme.toml, supports, asset output)
//!     → router.rs resolve
//!         "<theme>/blog/first-post.html" exists → Found
//!         otherwise, and path != "/"           → NotFound (404.html or index.html)
//!         path == "/"                          → index.html
//!     → render on a blocking thread
//!     → RenderedPage { html, not_found }
//! ```
//!
//! # Design Decisions
//! - Theme files are the routes; there is no route table
//! - Deterministic: same theme files and path always pick the same template
//! - The head/body-open/body-close cycle fires at most once per request

pub mod router;

pub use router::{resolve, PageRouter, RenderError, RenderedPage, Resolution};
