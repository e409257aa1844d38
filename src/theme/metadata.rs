//! Theme metadata read from the stylesheet header.
//!
//! A theme describes itself in a comment that must open on the first line
//! of `theme.css`:
//!
//! ```text
//! /*
//! Name: Plain
//! Author: Jane Doe
//! Version: 1.2
//! */
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use crate::theme::catalog::ThemeCatalog;

const OPENERS: [&str; 2] = ["/*", "/**"];
const CLOSERS: [&str; 2] = ["*/", "**/"];
const SEPARATOR: &str = ": ";

/// Parsed headers, keyed by theme name. Filled on first lookup per theme.
#[derive(Debug, Default, Clone)]
pub struct ThemeMetadataCache {
    themes: HashMap<String, HashMap<String, String>>,
}

impl ThemeMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key` in `theme`'s header, or an empty string.
    ///
    /// `key` may be given in lowercase hyphenated form (`theme-uri`); it is
    /// matched as `Theme Uri`. Unreadable stylesheets are logged and yield an
    /// empty string without being cached.
    pub fn lookup(&mut self, catalog: &ThemeCatalog, theme: &str, key: &str) -> String {
        let key = normalize_key(key);

        if let Some(info) = self.themes.get(theme) {
            return info.get(&key).cloned().unwrap_or_default();
        }

        if !catalog.theme_exists(theme) {
            return String::new();
        }

        let path = catalog.stylesheet_path(theme);
        let info = match File::open(&path).and_then(|f| parse_header(BufReader::new(f))) {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(theme, path = %path.display(), error = %e, "Unable to read theme stylesheet");
                return String::new();
            }
        };

        let value = info.get(&key).cloned().unwrap_or_default();
        self.themes.insert(theme.to_string(), info);
        value
    }

    pub fn is_cached(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }
}

/// Collect `Key: value` lines of a leading comment block.
///
/// Nothing is collected unless the very first line opens a comment; reading
/// stops at the closing line.
pub fn parse_header<R: BufRead>(reader: R) -> io::Result<HashMap<String, String>> {
    let mut info = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if index == 0 {
            if OPENERS.contains(&line) {
                continue;
            }
            break;
        }

        if CLOSERS.contains(&line) {
            break;
        }

        if let Some(pos) = line.find(SEPARATOR) {
            if pos > 0 {
                info.insert(
                    line[..pos].to_string(),
                    line[pos + SEPARATOR.len()..].to_string(),
                );
            }
        }
    }

    Ok(info)
}

/// `theme-uri` → `Theme Uri`.
pub fn normalize_key(key: &str) -> String {
    title_case(&key.replace('-', " "))
}

/// Upper-case the first letter of every whitespace-separated word, leaving
/// the remaining letters untouched.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
