//! # Infrastructure Layer
//!
//! Concrete implementations behind the JobBoard client's OTP verification
//! flow:
//! - **API**: user API clients (`reqwest` over HTTP, and an in-process mock)
//! - **Configuration**: `.env` loading on top of the shared config types
//! - **Telemetry**: `tracing-subscriber` setup driven by `LoggingConfig`
//!
//! ## Features
//!
//! - `http-api`: Enable the HTTP user API client (default)

use jb_shared::config::{ApiProvider, AppConfig};

/// User API clients
pub mod api;

/// Tracing subscriber initialisation
pub mod telemetry;

pub use api::{create_user_api, MockUserApi};
#[cfg(feature = "http-api")]
pub use api::HttpUserApi;
pub use telemetry::init_tracing;

/// Load client configuration from the environment
///
/// Reads `.env` and the environment-specific file (for example
/// `.env.production`) when present, then builds `AppConfig::from_env`.
/// Variables already set in the process take precedence over both files.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = jb_shared::config::Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let config = AppConfig::from_env();
    validate_config(&config)?;

    tracing::debug!(
        environment = %config.environment,
        provider = ?config.api.provider,
        "Loaded client configuration"
    );
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.api.base_url.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "API_BASE_URL must not be empty".to_string(),
        ));
    }
    if config.environment.is_production() && config.api.provider == ApiProvider::Mock {
        return Err(InfrastructureError::Config(
            "the mock user API cannot be used in production".to_string(),
        ));
    }
    if config.verification.tick_interval_ms == 0 {
        return Err(InfrastructureError::Config(
            "OTP_TICK_INTERVAL_MS must be greater than zero".to_string(),
        ));
    }
    if !config.verification.success_redirect_path.starts_with('/') {
        return Err(InfrastructureError::Config(format!(
            "OTP_SUCCESS_REDIRECT_PATH must be an absolute path, got '{}'",
            config.verification.success_redirect_path
        )));
    }
    Ok(())
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or transport error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
