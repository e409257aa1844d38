//! Hookpress: a small theming layer for file-based sites.
//!
//! Themes are directories of HTML templates, a stylesheet whose header
//! comment carries the theme metadata, and a `theme.toml` setup manifest.
//! Requests are mapped to template files; templates fire named action hooks
//! and may pull in Markdown content.

pub mod assets;
pub mod config;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod markdown;
pub mod observability;
pub mod routing;
pub mod theme;

pub use config::schema::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
