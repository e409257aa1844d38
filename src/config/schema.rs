//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Site identity (name, language, base URL, active theme).
    pub site: SiteInfo,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Filesystem locations.
    pub paths: PathsConfig,

    /// Asset probe settings.
    pub assets: AssetsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SiteConfig {
    /// Key/value lookup used by templates. Unknown keys yield an empty string.
    pub fn get(&self, key: &str) -> String {
        match key {
            "theme" => self.site.theme.clone(),
            "name" => self.site.name.clone(),
            "lang" => self.site.lang.clone(),
            "charset" => self.site.charset.clone(),
            "url" => self.site.url.clone(),
            _ => String::new(),
        }
    }
}

/// Values exposed to themes through `config:<key>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Site name, used in titles.
    pub name: String,

    /// Value of the `lang` attribute; empty omits the attribute.
    pub lang: String,

    /// Document character set.
    pub charset: String,

    /// Public base URL of the site (e.g., "https://example.com").
    pub url: String,

    /// Directory name of the active theme.
    pub theme: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Hookpress".to_string(),
            lang: "en".to_string(),
            charset: "UTF-8".to_string(),
            url: "http://localhost:8080".to_string(),
            theme: "default".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one sub-directory per theme.
    pub themes_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            themes_dir: "content/themes".to_string(),
        }
    }
}

/// Asset registration settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Transport timeout for a single content-type probe, in seconds.
    pub probe_timeout_secs: u64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
