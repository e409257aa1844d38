//! Theme setup declared in `theme.toml`.
//!
//! ```toml
//! supports = ["title-tag"]
//! body_classes = ["plain"]
//!
//! [[styles]]
//! id = "theme"
//! path = "theme.css"
//! version = "1.2"
//!
//! [[actions]]
//! event = "body_open"
//! name = "banner"
//! html = "<h1>{{ config:name }}</h1>"
//!
//! [[remove_actions]]
//! event = "body_close"
//! name = "attribution"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::ContentTypeProbe;
use crate::theme::context::RequestContext;

/// Errors raised while reading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A theme's setup declarations.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeManifest {
    /// Feature supports such as `title-tag`.
    pub supports: Vec<String>,

    /// Classes added to the body tag.
    pub body_classes: Vec<String>,

    pub styles: Vec<AssetDecl>,

    pub scripts: Vec<AssetDecl>,

    /// Snippet hooks, registered in order.
    pub actions: Vec<ActionDecl>,

    /// Removals applied after the theme's own actions.
    pub remove_actions: Vec<RemoveDecl>,
}

/// A stylesheet or script to register.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetDecl {
    pub id: String,

    /// Absolute URL, or a path relative to the theme directory URL.
    pub path: String,

    #[serde(default)]
    pub version: Option<String>,
}

/// A hook that echoes an HTML snippet.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionDecl {
    pub event: String,
    pub name: String,

    /// Expanded like a page template when the hook fires.
    pub html: String,
}

/// Removes one named hook, or every hook of an event when `name` is absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveDecl {
    pub event: String,

    #[serde(default)]
    pub name: Option<String>,
}

impl ThemeManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load `path` if given; problems are logged and leave the theme without setup.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unusable theme manifest");
                Self::default()
            }
        }
    }

    /// Register this theme's hooks, supports, body classes and assets.
    pub async fn apply(&self, ctx: &mut RequestContext, probe: &dyn ContentTypeProbe) {
        for action in &self.actions {
            let html = action.html.clone();
            ctx.hooks
                .add(&action.event, &action.name, move |ctx| ctx.echo_template(&html));
        }

        for removal in &self.remove_actions {
            ctx.hooks.remove(&removal.event, removal.name.as_deref());
        }

        for support in &self.supports {
            ctx.add_support(support);
        }

        for classes in &self.body_classes {
            ctx.add_body_class(classes);
        }

        for style in &self.styles {
            let url = ctx.asset_url(&style.path);
            ctx.styles
                .register(probe, &style.id, &url, style.version.as_deref())
                .await;
        }

        for script in &self.scripts {
            let url = ctx.asset_url(&script.path);
            ctx.scripts
                .register(probe, &script.id, &url, script.version.as_deref())
                .await;
        }
    }
}
