//! Configuration module with feature-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `api` - User API client selection, base URL and timeouts
//! - `environment` - Environment detection and logging configuration
//! - `verification` - OTP verification workflow timing and redirect

pub mod api;
pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use api::{ApiConfig, ApiProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Complete client configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// User API configuration
    pub api: ApiConfig,

    /// OTP verification workflow configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            api: ApiConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig::mock(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig::new("https://api.jobboard.example/api"),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// The environment picks the baseline; `API_*` and `OTP_*` variables
    /// override it when present.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };
        config.api = config.api.merge_env();
        config.verification = VerificationConfig::from_env();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        config
    }
}
