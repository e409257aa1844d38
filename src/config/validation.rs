//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check that addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SiteConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.theme must not be empty")]
    EmptyTheme,

    #[error("site.theme `{0}` must be a plain directory name")]
    InvalidThemeName(String),

    #[error("site.url `{0}` is not a valid absolute URL")]
    InvalidSiteUrl(String),

    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a parsed configuration.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let theme = config.site.theme.trim();
    if theme.is_empty() {
        errors.push(ValidationError::EmptyTheme);
    } else if theme.contains(['/', '\\']) || theme == "." || theme == ".." {
        errors.push(ValidationError::InvalidThemeName(config.site.theme.clone()));
    }

    if Url::parse(&config.site.url).is_err() {
        errors.push(ValidationError::InvalidSiteUrl(config.site.url.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.assets.probe_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("assets.probe_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SiteConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = SiteConfig::default();
        config.site.theme = "".into();
        config.site.url = "not a url".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyTheme,
                ValidationError::InvalidSiteUrl("not a url".into()),
                ValidationError::ZeroTimeout("timeouts.request_secs"),
            ]
        );
    }

    #[test]
    fn test_theme_name_cannot_escape_themes_dir() {
        let mut config = SiteConfig::default();
        config.site.theme = "../etc".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidThemeName(_)));
    }
}
