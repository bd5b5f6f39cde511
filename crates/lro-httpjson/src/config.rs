//! Transport configuration
//!
//! A minimal TOML file is enough:
//!
//! ```toml
//! endpoint = "https://${LRO_HOST}"
//! api_version = "v1"
//! timeout_secs = 30
//! ```
//!
//! Environment variables in the file are expanded before parsing. Variables
//! that are not set are left as-is and will usually make the endpoint invalid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = concat!("lro-httpjson/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP/JSON transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpJsonConfig {
    /// Base URL of the service, e.g. `https://longrunning.example.com`
    pub endpoint: String,

    /// Version segment prepended to every operation path
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpJsonConfig {
    /// Config for `endpoint` with every other setting at its default
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Parse a TOML document, expanding environment variables first
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        let config: HttpJsonConfig = toml::from_str(&expanded)?;
        config.base_url()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validated base URL that operation paths are joined onto
    ///
    /// The result always ends with `/{api_version}/`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("endpoint must not carry a query or fragment".to_string()));
        }

        let mut path = url.path().trim_end_matches('/').to_string();
        let version = self.api_version.trim_matches('/');
        if !version.is_empty() {
            path.push('/');
            path.push_str(version);
        }
        path.push('/');
        url.set_path(&path);
        Ok(url)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// Default value functions for serde
fn default_api_version() -> String {
    "v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config =
            HttpJsonConfig::from_toml_str(r#"endpoint = "https://lro.example.com""#).unwrap();
        assert_eq!(config, HttpJsonConfig::new("https://lro.example.com"));
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("lro-httpjson/"));
    }

    #[test]
    fn test_base_url_appends_version() {
        let config = HttpJsonConfig::new("https://lro.example.com");
        assert_eq!(config.base_url().unwrap().as_str(), "https://lro.example.com/v1/");

        let config = HttpJsonConfig::new("https://lro.example.com/api/");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://lro.example.com/api/v1/"
        );
    }

    #[test]
    fn test_base_url_without_version() {
        let mut config = HttpJsonConfig::new("http://localhost:8080");
        config.api_version = String::new();
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        let err = HttpJsonConfig::new("ftp://lro.example.com").base_url().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_rejects_query() {
        let err = HttpJsonConfig::new("https://lro.example.com/?key=1")
            .base_url()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_missing_endpoint_is_parse_error() {
        let err = HttpJsonConfig::from_toml_str("timeout_secs = 5").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
