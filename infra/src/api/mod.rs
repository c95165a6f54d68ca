//! User API Module
//!
//! Clients for the two user endpoints the OTP verification flow calls:
//! `users/verify-otp/` and `users/resend-otp/`. Both implementations satisfy
//! the core `UserApiTrait`, so they plug straight into the session-bound
//! verify and resend actions.

use std::sync::Arc;

use jb_core::services::session::UserApiTrait;
use jb_shared::config::{ApiConfig, ApiProvider};

pub mod mock_user_api;

// HTTP client (feature-gated)
#[cfg(feature = "http-api")]
pub mod http_user_api;

pub use mock_user_api::MockUserApi;

#[cfg(feature = "http-api")]
pub use http_user_api::HttpUserApi;


/// Create a user API client based on configuration
///
/// Falls back to the mock client when the HTTP client cannot be built, or
/// when the `http-api` feature is disabled.
pub fn create_user_api(config: &ApiConfig) -> Arc<dyn UserApiTrait> {
    match config.provider {
        ApiProvider::Mock => Arc::new(MockUserApi::from_config(config)),
        #[cfg(feature = "http-api")]
        ApiProvider::Http => match HttpUserApi::new(config) {
            Ok(api) => Arc::new(api),
            Err(e) => {
                tracing::error!("Failed to initialize HTTP user API: {}", e);
                tracing::warn!("Falling back to mock user API");
                Arc::new(MockUserApi::from_config(config))
            }
        },
        #[cfg(not(feature = "http-api"))]
        ApiProvider::Http => {
            tracing::warn!("HTTP user API not compiled in, using mock implementation");
            Arc::new(MockUserApi::from_config(config))
        }
    }
}
