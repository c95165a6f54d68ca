//! User API client configuration

use serde::{Deserialize, Serialize};

/// Which user API implementation the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    /// JSON over HTTP against the backend
    Http,
    /// In-process mock for development
    Mock,
}

impl std::str::FromStr for ApiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(ApiProvider::Http),
            "mock" => Ok(ApiProvider::Mock),
            _ => Err(format!("Invalid API provider: {}", s)),
        }
    }
}

/// User API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Implementation to use
    pub provider: ApiProvider,

    /// Base URL of the backend API, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Code accepted by the mock provider
    #[serde(default)]
    pub mock_code: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::mock()
    }
}

impl ApiConfig {
    /// HTTP configuration against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            provider: ApiProvider::Http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: default_timeout_secs(),
            mock_code: None,
        }
    }

    /// Mock configuration for development
    pub fn mock() -> Self {
        Self {
            provider: ApiProvider::Mock,
            base_url: String::from("http://localhost:8000/api"),
            timeout_secs: default_timeout_secs(),
            mock_code: None,
        }
    }

    /// Override fields from `API_PROVIDER`, `API_BASE_URL`, `API_TIMEOUT_SECS`
    /// and `API_MOCK_CODE` when set
    pub fn merge_env(mut self) -> Self {
        if let Some(provider) = std::env::var("API_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.provider = provider;
        }
        if let Ok(base_url) = std::env::var("API_BASE_URL") {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = std::env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = timeout;
        }
        if let Ok(code) = std::env::var("API_MOCK_CODE") {
            self.mock_code = Some(code);
        }
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}
