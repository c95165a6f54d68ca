//! Trait for the user API client the session actions call

use async_trait::async_trait;
use serde_json::Value;

/// A failed user API call
///
/// `message` is the backend's user-facing message when it sent one; it is
/// what ends up in the session store's `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl ApiFailure {
    pub fn new(status: Option<u16>, message: Option<String>) -> Self {
        Self { status, message }
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, self.message.as_deref()) {
            (Some(status), Some(message)) => write!(f, "{} ({})", message, status),
            (Some(status), None) => write!(f, "Request failed with status {}", status),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "Request failed"),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// User API operations used by the verification flow
#[async_trait]
pub trait UserApiTrait: Send + Sync {
    /// Verify an OTP code; returns the user payload on success
    async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<Value, ApiFailure>;
    /// Send a fresh OTP code to the email address
    async fn resend_otp(&self, email: &str) -> Result<Value, ApiFailure>;
}
