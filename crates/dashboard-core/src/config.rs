//! Dashboard service configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default benchmarker master address.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5115";

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the dashboard fetches its data and how it logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub api_base_url: String,
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Parse a stored config; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Check the base URL and strip trailing slashes from it.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url));
        }
        self.api_base_url = url;
        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
        Ok(self)
    }

    /// Full URL of an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ServiceConfig::from_json("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_validate_trims_trailing_slash() {
        let config = ServiceConfig {
            api_base_url: " https://master.example/api/ ".to_string(),
            log_filter: String::new(),
        }
        .validate()
        .unwrap();

        assert_eq!(config.api_base_url, "https://master.example/api");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(
            config.endpoint("/mainnet-info"),
            "https://master.example/api/mainnet-info"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = ServiceConfig::from_json(r#"{ "api_base_url": "ftp://master" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(url) if url == "ftp://master"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ServiceConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
