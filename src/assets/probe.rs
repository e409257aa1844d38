//! Remote content-type probing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use url::Url;

/// Errors raised while probing an asset URL.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid asset url: {0}")]
    InvalidUrl(String),

    #[error("host {host} could not be resolved")]
    Unresolvable {
        host: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Looks up the `Content-Type` an asset URL is served with.
#[async_trait]
pub trait ContentTypeProbe: Send + Sync {
    /// `Ok(None)` when the response carries no `Content-Type` header.
    async fn content_type(&self, url: &str) -> Result<Option<String>, ProbeError>;
}

/// Probe backed by a real HTTP client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a probe whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hookpress/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Probe through a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentTypeProbe for HttpProbe {
    async fn content_type(&self, url: &str) -> Result<Option<String>, ProbeError> {
        let parsed = Url::parse(url).map_err(|_| ProbeError::InvalidUrl(url.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ProbeError::InvalidUrl(url.to_string()))?
            .to_string();
        let port = parsed.port_or_known_default().unwrap_or(80);

        // An unreachable host rejects the asset before any request is made.
        let resolved = tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(|e| ProbeError::Unresolvable {
                host: host.clone(),
                source: Some(e),
            })?
            .next()
            .is_some();
        if !resolved {
            return Err(ProbeError::Unresolvable { host, source: None });
        }

        let response = self.client.get(parsed).send().await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(content_type)
    }
}
