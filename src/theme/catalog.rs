//! Theme discovery and theme-relative file resolution.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// File every theme must ship, holding its metadata header.
pub const STYLESHEET: &str = "theme.css";

/// Template every theme must ship.
pub const INDEX_TEMPLATE: &str = "index.html";

/// The themes directory.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes_dir: PathBuf,
}

impl ThemeCatalog {
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
        }
    }

    pub fn themes_dir(&self) -> &Path {
        &self.themes_dir
    }

    /// Names of every usable theme, sorted.
    ///
    /// A directory is a theme when it holds both a stylesheet and an index template.
    pub fn available_themes(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.themes_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %self.themes_dir.display(), error = %e, "Themes directory not readable");
                return Vec::new();
            }
        };

        let mut themes: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.theme_exists(name))
            .collect();
        themes.sort();
        themes
    }

    pub fn theme_exists(&self, theme: &str) -> bool {
        if !is_plain_name(theme) {
            return false;
        }
        let dir = self.themes_dir.join(theme);
        dir.join(STYLESHEET).is_file() && dir.join(INDEX_TEMPLATE).is_file()
    }

    /// Path of `theme`'s metadata stylesheet.
    pub fn stylesheet_path(&self, theme: &str) -> PathBuf {
        self.themes_dir.join(theme).join(STYLESHEET)
    }

    /// `<themes_dir>/<theme>/<part>.<extension>` when that file exists.
    ///
    /// `part` may name a nested file (`blog/first-post`) but cannot leave the
    /// theme directory.
    pub fn file_path(&self, theme: &str, part: &str, extension: &str) -> Option<PathBuf> {
        if !is_plain_name(theme) || part.is_empty() {
            return None;
        }
        let relative = Path::new(part);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let path = self
            .themes_dir
            .join(theme)
            .join(format!("{part}.{extension}"));
        path.is_file().then_some(path)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
