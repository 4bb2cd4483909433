//! Client configuration for the Vantage API.
//!
//! This module provides the [`Config`] structure that controls how a client
//! connects to and authenticates against a Vantage deployment.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

/// Configuration for a Vantage client instance.
///
/// The base URL is validated and normalized on construction and on every
/// mutation: it must be an absolute `http`/`https` URL with a host, and it
/// always ends with exactly one trailing slash.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Config {
    /// API key used to authenticate requests. Optional; requests are sent
    /// anonymously when absent. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL of the API, normalized to end with a trailing slash.
    #[validate(url)]
    base_url: String,

    /// Default team slug used when an operation is not given one explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_team: Option<String>,
}

impl Config {
    /// Create a new configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL is malformed.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let config = Self {
            api_key: None,
            base_url: normalize_base_url(base_url.as_ref())?,
            default_team: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the API key used for authentication.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the default team slug.
    #[must_use]
    pub fn with_default_team(mut self, slug: impl Into<String>) -> Self {
        self.default_team = Some(slug.into());
        self
    }

    /// The normalized base URL, always ending with a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the base URL, re-running normalization and validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the new URL is malformed; the
    /// previous value is kept in that case.
    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) -> Result<()> {
        self.base_url = normalize_base_url(base_url.as_ref())?;
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        Ok(())
    }

    /// Expose the configured API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Resolve the team slug for an operation: the explicit argument wins,
    /// then the configured default team.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when neither is present.
    pub fn team_slug<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit.or(self.default_team.as_deref()).ok_or_else(|| {
            Error::ConfigError("no team slug given and no default team configured".to_string())
        })
    }

    /// Parse the base URL into a [`Url`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the stored URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }
}

/// Trim and validate a base URL, appending the trailing slash when missing.
fn normalize_base_url(input: &str) -> Result<String> {
    let mut url = input.trim().to_string();
    if !url.ends_with('/') {
        url.push('/');
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::ConfigError(format!(
            "base_url must start with http or https: `{url}`"
        )));
    }
    if url.matches('/').count() < 3 {
        return Err(Error::ConfigError(format!(
            "base_url is missing its host or path structure: `{url}`"
        )));
    }

    let parsed = Url::parse(&url)
        .map_err(|e| Error::ConfigError(format!("base_url is not a valid URL: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(Error::ConfigError(format!(
            "base_url has no host: `{url}`"
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new("https://api.vantage.example.com/api").unwrap();
        assert_eq!(config.base_url(), "https://api.vantage.example.com/api/");
        assert!(config.api_key.is_none());
        assert!(config.default_team.is_none());
    }

    #[test]
    fn test_config_appends_single_trailing_slash() {
        let with_slash = Config::new("https://api.vantage.example.com/").unwrap();
        let without_slash = Config::new("https://api.vantage.example.com").unwrap();
        assert_eq!(with_slash.base_url(), without_slash.base_url());
        assert!(without_slash.base_url().ends_with('/'));
        assert!(!without_slash.base_url().ends_with("//"));
    }

    #[test]
    fn test_config_trims_whitespace() {
        let config = Config::new("  https://api.vantage.example.com  ").unwrap();
        assert_eq!(config.base_url(), "https://api.vantage.example.com/");
    }

    #[test]
    fn test_config_rejects_non_http_scheme() {
        let result = Config::new("ftp://api.vantage.example.com");
        assert!(matches!(result, Err(Error::ConfigError(_))));

        let result = Config::new("api.vantage.example.com");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_config_rejects_not_a_url() {
        let result = Config::new("https://");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new("https://api.vantage.example.com")
            .unwrap()
            .with_api_key("test-key")
            .with_default_team("default-team");

        assert_eq!(config.api_key(), Some("test-key"));
        assert_eq!(config.default_team.as_deref(), Some("default-team"));
    }

    #[test]
    fn test_config_set_base_url_revalidates() {
        let mut config = Config::new("https://api.vantage.example.com").unwrap();
        config.set_base_url("https://other.example.com").unwrap();
        assert_eq!(config.base_url(), "https://other.example.com/");

        let result = config.set_base_url("not-a-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_team_slug_resolution() {
        let config = Config::new("https://api.vantage.example.com")
            .unwrap()
            .with_default_team("default-team");

        assert_eq!(config.team_slug(Some("explicit")).unwrap(), "explicit");
        assert_eq!(config.team_slug(None).unwrap(), "default-team");

        let bare = Config::new("https://api.vantage.example.com").unwrap();
        assert!(matches!(bare.team_slug(None), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_config_parse_base_url() {
        let config = Config::new("https://api.vantage.example.com:8080").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.vantage.example.com"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_config_api_key_not_serialized() {
        let config = Config::new("https://api.vantage.example.com")
            .unwrap()
            .with_api_key("super-secret");

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_config_api_key_redacted_in_debug() {
        let config = Config::new("https://api.vantage.example.com")
            .unwrap()
            .with_api_key("super-secret");

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"base_url": "https://api.vantage.example.com/", "default_team": "ops"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url(), "https://api.vantage.example.com/");
        assert_eq!(config.default_team.as_deref(), Some("ops"));
        assert!(config.api_key.is_none());
    }
}
