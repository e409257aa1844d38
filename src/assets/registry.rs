//! Style and script registries.

use std::fmt;

use crate::assets::probe::ContentTypeProbe;
use crate::observability::metrics;

/// Which registry an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Style,
    Script,
}

impl AssetKind {
    /// Whether a probed `Content-Type` is acceptable for this kind.
    pub fn accepts(&self, content_type: &str) -> bool {
        match self {
            AssetKind::Style => content_type == "text/css",
            AssetKind::Script => {
                content_type == "text/javascript" || content_type == "application/javascript"
            }
        }
    }

    /// Suffix of the tag's `id` attribute.
    pub fn id_suffix(&self) -> &'static str {
        match self {
            AssetKind::Style => "css",
            AssetKind::Script => "js",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Style => "style",
            AssetKind::Script => "script",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub id: String,
    pub path: String,
    pub version: Option<String>,
    pub kind: AssetKind,
    /// Content type observed when the asset was probed.
    pub content_type: String,
}

impl AssetEntry {
    /// URL with the `?ver=` query appended when a version was given.
    pub fn href(&self) -> String {
        match &self.version {
            Some(ver) => format!("{}?ver={}", self.path, ver),
            None => self.path.clone(),
        }
    }

    /// The markup tag for this entry.
    pub fn to_tag(&self) -> String {
        match self.kind {
            AssetKind::Style => format!(
                "\n<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" id=\"{}-{}\">\n",
                self.href(),
                self.id,
                self.kind.id_suffix()
            ),
            AssetKind::Script => format!(
                "\n<script type=\"{}\" src=\"{}\" id=\"{}-{}\"></script>\n",
                self.content_type,
                self.href(),
                self.id,
                self.kind.id_suffix()
            ),
        }
    }
}

/// At-most-once-per-id collection of assets of a single kind.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    kind: AssetKind,
    entries: Vec<AssetEntry>,
}

impl AssetRegistry {
    pub fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn styles() -> Self {
        Self::new(AssetKind::Style)
    }

    pub fn scripts() -> Self {
        Self::new(AssetKind::Script)
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Register an asset after checking how `path` is served.
    ///
    /// Duplicate ids, unreachable hosts and unexpected content types are all
    /// dropped without telling the caller. An empty `version` counts as none.
    pub async fn register(
        &mut self,
        probe: &dyn ContentTypeProbe,
        id: &str,
        path: &str,
        version: Option<&str>,
    ) {
        if self.contains(id) {
            tracing::debug!(kind = %self.kind, id, "Asset id already registered");
            return;
        }

        let content_type = match probe.content_type(path).await {
            Ok(Some(ct)) if self.kind.accepts(&ct) => ct,
            Ok(Some(ct)) => {
                tracing::debug!(kind = %self.kind, id, path, content_type = %ct, "Asset rejected: unexpected content type");
                metrics::record_asset_probe(self.kind.as_str(), "wrong_type");
                return;
            }
            Ok(None) => {
                tracing::debug!(kind = %self.kind, id, path, "Asset rejected: no content type");
                metrics::record_asset_probe(self.kind.as_str(), "wrong_type");
                return;
            }
            Err(e) => {
                tracing::debug!(kind = %self.kind, id, path, error = %e, "Asset rejected: probe failed");
                metrics::record_asset_probe(self.kind.as_str(), "unreachable");
                return;
            }
        };

        metrics::record_asset_probe(self.kind.as_str(), "accepted");
        self.entries.push(AssetEntry {
            id: id.to_string(),
            path: path.to_string(),
            version: version.filter(|v| !v.is_empty()).map(str::to_string),
            kind: self.kind,
            content_type,
        });
    }

    /// Accepted entries in insertion order.
    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    /// Concatenated tags for every entry.
    pub fn output(&self) -> String {
        self.entries.iter().map(AssetEntry::to_tag).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
