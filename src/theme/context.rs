//! Per-request theme state.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::assets::AssetRegistry;
use crate::config::SiteConfig;
use crate::hooks::{self, events, HookHost, HookRegistry};
use crate::markdown;
use crate::theme::builtin;
use crate::theme::catalog::ThemeCatalog;
use crate::theme::metadata::{title_case, ThemeMetadataCache};
use crate::theme::template;

/// URL path under which theme directories are served.
pub const THEMES_URL_PATH: &str = "/content/themes";

/// Where a request is in its dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Dispatching,
    Found,
    NotFound,
    Rendered,
}

/// Lifecycle events already fired for this request.
#[derive(Debug, Default, Clone, Copy)]
struct Lifecycle {
    head: bool,
    body_open: bool,
    body_close: bool,
}

/// Everything one request renders against.
///
/// Built when the request arrives and dropped with the response, so hooks,
/// assets and cached metadata never leak between requests.
pub struct RequestContext {
    config: Arc<SiteConfig>,
    catalog: ThemeCatalog,
    pub hooks: HookRegistry<RequestContext>,
    pub styles: AssetRegistry,
    pub scripts: AssetRegistry,
    metadata: ThemeMetadataCache,
    supports: Vec<String>,
    body_classes: Vec<String>,
    request_path: String,
    not_found: bool,
    phase: Phase,
    loaded_parts: HashSet<PathBuf>,
    lifecycle: Lifecycle,
    firing_body_class: bool,
    output: String,
}

impl HookHost for RequestContext {
    fn hooks(&self) -> &HookRegistry<Self> {
        &self.hooks
    }
}

impl RequestContext {
    /// `request_path` is the requested path without its leading `/`.
    pub fn new(config: Arc<SiteConfig>, request_path: &str) -> Self {
        let catalog = ThemeCatalog::new(&config.paths.themes_dir);
        Self {
            config,
            catalog,
            hooks: HookRegistry::new(),
            styles: AssetRegistry::styles(),
            scripts: AssetRegistry::scripts(),
            metadata: ThemeMetadataCache::new(),
            supports: Vec::new(),
            body_classes: Vec::new(),
            request_path: request_path.to_string(),
            not_found: false,
            phase: Phase::Init,
            loaded_parts: HashSet::new(),
            lifecycle: Lifecycle::default(),
            firing_body_class: false,
            output: String::new(),
        }
    }

    pub fn site_config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Configuration value for `key`, empty when unknown.
    pub fn config(&self, key: &str) -> String {
        self.config.get(key)
    }

    pub fn theme(&self) -> &str {
        &self.config.site.theme
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        tracing::trace!(from = ?self.phase, to = ?phase, path = %self.request_path, "Dispatch phase");
        self.phase = phase;
    }

    pub fn set_not_found(&mut self, not_found: bool) {
        self.not_found = not_found;
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }

    pub fn echo(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Expand template placeholders in `text` and echo the result.
    pub fn echo_template(&mut self, text: &str) {
        template::expand(self, text);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    /// Fire every hook of `event` against this context.
    ///
    /// Works on a snapshot, so hooks removed by an earlier callback of the
    /// same firing still run this time.
    pub fn do_action(&mut self, event: &str) {
        hooks::fire(self, event);
    }

    /// Fire `head`, once per request.
    pub fn theme_head(&mut self) {
        if std::mem::replace(&mut self.lifecycle.head, true) {
            return;
        }
        self.do_action(events::HEAD);
    }

    /// Fire `body_open` then `body_top`, once per request.
    pub fn theme_body_open(&mut self) {
        if std::mem::replace(&mut self.lifecycle.body_open, true) {
            return;
        }
        self.do_action(events::BODY_OPEN);
        self.do_action(events::BODY_TOP);
    }

    /// Fire `body_close` then `body_bottom`, once per request.
    pub fn theme_body_close(&mut self) {
        if std::mem::replace(&mut self.lifecycle.body_close, true) {
            return;
        }
        self.do_action(events::BODY_CLOSE);
        self.do_action(events::BODY_BOTTOM);
    }

    /// Metadata value from the active theme's stylesheet header.
    pub fn theme_info(&mut self, key: &str) -> String {
        let theme = self.config.site.theme.clone();
        self.theme_info_for(key, &theme)
    }

    /// Metadata value from `theme`'s stylesheet header.
    pub fn theme_info_for(&mut self, key: &str, theme: &str) -> String {
        self.metadata.lookup(&self.catalog, theme, key)
    }

    /// `<themes_dir>/<active theme>/<part>.<extension>` when it exists.
    pub fn theme_file_path(&self, part: &str, extension: &str) -> Option<PathBuf> {
        self.catalog.file_path(self.theme(), part, extension)
    }

    /// Render the template `<part>.html`; a part is rendered at most once.
    pub fn load_part(&mut self, part: &str) {
        let Some(path) = self.theme_file_path(part, "html") else {
            tracing::debug!(part, "Theme part not found");
            return;
        };
        if !self.loaded_parts.insert(path.clone()) {
            return;
        }

        match fs::read_to_string(&path) {
            Ok(text) => self.echo_template(&text),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Unable to read theme part");
            }
        }
    }

    /// Render `<name>.md` from the active theme through the Markdown renderer.
    pub fn markdown_part(&mut self, name: &str) {
        let Some(path) = self.theme_file_path(name, "md") else {
            tracing::debug!(name, "Markdown part not found");
            return;
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                let html = markdown::render(&text);
                self.echo(&html);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Unable to read markdown part");
            }
        }
    }

    /// Absolute URL for `path` below the site URL.
    pub fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        let base = self.config.site.url.trim_end_matches('/');
        format!("{base}/{path}")
    }

    /// Absolute URL for `path` inside the active theme directory.
    pub fn theme_url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.url(&format!("{THEMES_URL_PATH}/{}/{path}", self.theme()))
    }

    pub fn stylesheet_url(&self) -> String {
        self.theme_url(crate::theme::catalog::STYLESHEET)
    }

    /// Absolute asset URLs pass through; anything else is theme-relative.
    pub fn asset_url(&self, path: &str) -> String {
        match Url::parse(path) {
            Ok(url) if url.has_host() => path.to_string(),
            _ => self.theme_url(path),
        }
    }

    /// `lang="…"` for the html tag, or nothing when no language is set.
    pub fn lang_attr(&self) -> String {
        let lang = self.config("lang");
        if lang.is_empty() {
            String::new()
        } else {
            format!("lang=\"{lang}\"")
        }
    }

    /// Meta tags: `charset`, `viewport`, or both when `data` is empty.
    pub fn meta(&self, data: &str) -> String {
        match data {
            "" => format!("\n{}\n{}\n", self.meta("charset"), self.meta("viewport")),
            "charset" => format!("<meta charset=\"{}\">", self.config("charset")),
            "viewport" => {
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string()
            }
            _ => String::new(),
        }
    }

    pub fn add_support(&mut self, support: &str) {
        self.supports.push(support.to_string());
    }

    pub fn supports(&self) -> &[String] {
        &self.supports
    }

    /// Register the hooks behind declared supports.
    pub fn apply_supports(&mut self) {
        for support in self.supports.clone() {
            if support == "title-tag" {
                self.hooks
                    .add(events::HEAD, builtin::TITLE_TAG, builtin::title_tag);
            }
        }
    }

    /// Add space-separated classes; each class is kept once, in first-seen order.
    pub fn add_body_class(&mut self, classes: &str) {
        for class in classes.split(' ').filter(|c| !c.is_empty()) {
            if !self.body_classes.iter().any(|c| c == class) {
                self.body_classes.push(class.to_string());
            }
        }
    }

    /// Fire `body_class`, then render the collected classes.
    ///
    /// Gives ` class="…"`, the bare list when `raw`, or nothing when there
    /// are no classes.
    pub fn body_class(&mut self, raw: bool) -> String {
        // A body_class hook asking for the classes gets the list as it stands.
        if !self.firing_body_class {
            self.firing_body_class = true;
            self.do_action(events::BODY_CLASS);
            self.firing_body_class = false;
        }

        let list = self.body_classes.join(" ");
        if list.is_empty() {
            String::new()
        } else if raw {
            list
        } else {
            format!(" class=\"{list}\"")
        }
    }

    /// Title for the current request, title-cased.
    ///
    /// Path separators become ` :: ` and `-`/`_` become spaces. The root page
    /// uses `landing` when given and the site name otherwise.
    pub fn generate_page_title(&self, landing: &str, append_name: bool) -> String {
        let suffix = if append_name {
            format!(" :: {}", self.config("name"))
        } else {
            String::new()
        };

        let path = self
            .request_path
            .replace(['-', '_'], " ")
            .replace('/', " :: ");

        let title = if self.not_found {
            format!("404 Not Found{suffix}")
        } else if !path.is_empty() {
            format!("{path}{suffix}")
        } else if !landing.is_empty() {
            format!("{landing}{suffix}")
        } else {
            self.config("name")
        };

        title_case(&title)
    }
}
