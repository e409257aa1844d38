//! Request path → theme page dispatch.
//!
//! # Responsibilities
//! - Build the per-request context and run theme setup
//! - Resolve the request path to a theme template
//! - Pick the 404 template or the index when nothing matches
//! - Render on a blocking thread (templates read files)
//!
//! # Design Decisions
//! - Only `/` maps to the index; any other unresolvable path is a 404
//! - The 404 template is optional; without one the index renders with a
//!   404 status and a "404 Not Found" title

use std::sync::Arc;

use thiserror::Error;

use crate::assets::ContentTypeProbe;
use crate::config::SiteConfig;
use crate::theme::{builtin, Phase, RequestContext, ThemeManifest};

/// Template rendered for the site root.
pub const INDEX_PART: &str = "index";

/// Template rendered for unresolvable paths, when the theme has one.
pub const NOT_FOUND_PART: &str = "404";

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Template to render, without extension.
    pub part: String,
    pub not_found: bool,
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub not_found: bool,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Decide which template serves `path`.
pub fn resolve(ctx: &RequestContext, path: &str) -> Resolution {
    let requested = ctx.request_path();

    if path != "/" && ctx.theme_file_path(requested, "html").is_some() {
        return Resolution {
            part: requested.to_string(),
            not_found: false,
        };
    }

    let not_found = path != "/";
    let part = if not_found && ctx.theme_file_path(NOT_FOUND_PART, "html").is_some() {
        NOT_FOUND_PART
    } else {
        INDEX_PART
    };

    Resolution {
        part: part.to_string(),
        not_found,
    }
}

/// Drives a request from setup to rendered markup.
pub struct PageRouter {
    probe: Arc<dyn ContentTypeProbe>,
}

impl PageRouter {
    pub fn new(probe: Arc<dyn ContentTypeProbe>) -> Self {
        Self { probe }
    }

    /// Register hooks and assets for the active theme.
    ///
    /// Order matters for output: baseline hooks, then the theme's manifest,
    /// then supports, then asset output.
    pub async fn prepare(&self, config: Arc<SiteConfig>, path: &str) -> RequestContext {
        let request_path = path.get(1..).unwrap_or_default();
        let mut ctx = RequestContext::new(config, request_path);

        builtin::register_baseline(&mut ctx);

        let manifest_path = ctx.theme_file_path("theme", "toml");
        let manifest = ThemeManifest::load_or_default(manifest_path.as_deref());
        manifest.apply(&mut ctx, self.probe.as_ref()).await;

        ctx.apply_supports();
        builtin::register_asset_output(&mut ctx);

        ctx
    }

    /// Serve `path`.
    pub async fn dispatch(
        &self,
        config: Arc<SiteConfig>,
        path: &str,
    ) -> Result<RenderedPage, RenderError> {
        let mut ctx = self.prepare(config, path).await;
        ctx.set_phase(Phase::Dispatching);

        let resolution = resolve(&ctx, path);
        ctx.set_not_found(resolution.not_found);
        ctx.set_phase(if resolution.not_found {
            Phase::NotFound
        } else {
            Phase::Found
        });

        tracing::debug!(
            path,
            theme = %ctx.theme(),
            part = %resolution.part,
            not_found = resolution.not_found,
            "Dispatching page"
        );

        let page = tokio::task::spawn_blocking(move || render(ctx, &resolution.part)).await?;
        Ok(page)
    }
}

/// Render `part` and finish the request.
pub fn render(mut ctx: RequestContext, part: &str) -> RenderedPage {
    ctx.load_part(part);
    ctx.set_phase(Phase::Rendered);

    let not_found = ctx.is_not_found();
    RenderedPage {
        html: ctx.into_output(),
        not_found,
    }
}
