//! Client configuration

use crate::{ClientError, ClientResult, HttpClient};

/// Status filter applied to catalog listings
pub const DEFAULT_CATALOG_STATUS: &str = "ACTIVE";

/// Request timeout used by the mobile app's API client
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration for the product backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// `status` query value for category and fabric listings
    pub catalog_status: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            catalog_status: DEFAULT_CATALOG_STATUS.to_string(),
        }
    }

    /// Read `LOOM_API_URL`, `LOOM_API_TOKEN` and `LOOM_API_TIMEOUT`, after loading `.env`
    ///
    /// A missing URL falls back to the default; an unparsable timeout is an error.
    pub fn from_env() -> ClientResult<Self> {
        dotenv::dotenv().ok();
        let mut config = match std::env::var("LOOM_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };
        if let Ok(token) = std::env::var("LOOM_API_TOKEN")
            && !token.is_empty()
        {
            config.token = Some(token);
        }
        if let Ok(raw) = std::env::var("LOOM_API_TIMEOUT") {
            config.timeout = raw
                .trim()
                .parse()
                .map_err(|_| ClientError::Internal(format!("LOOM_API_TIMEOUT is not a number: {raw}")))?;
        }
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_catalog_status(mut self, status: impl Into<String>) -> Self {
        self.catalog_status = status.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, 10);
        assert_eq!(config.catalog_status, "ACTIVE");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://backend.test/api")
            .with_token("abc")
            .with_timeout(3)
            .with_catalog_status("DRAFT");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 3);
        assert_eq!(config.catalog_status, "DRAFT");
        assert!(config.build_http_client().is_ok());
    }
}
