//! HTTP User API Implementation
//!
//! JSON client for the backend user endpoints:
//!
//! - `POST {base}/users/verify-otp/` with `{"email", "otp_code"}`
//! - `POST {base}/users/resend-otp/` with `{"email"}`
//!
//! A non-2xx response becomes an `ApiFailure` carrying the status and the
//! body's `message` field when present. Transport failures carry neither.

use async_trait::async_trait;
use jb_core::services::session::{ApiFailure, UserApiTrait};
use jb_shared::config::ApiConfig;
use jb_shared::error_codes;
use jb_shared::identity::mask_identity;
use jb_shared::ErrorResponse;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::InfrastructureError;

pub const VERIFY_OTP_PATH: &str = "users/verify-otp/";
pub const RESEND_OTP_PATH: &str = "users/resend-otp/";

#[derive(Debug, Serialize)]
struct VerifyOtpRequest<'a> {
    email: &'a str,
    otp_code: &'a str,
}

#[derive(Debug, Serialize)]
struct ResendOtpRequest<'a> {
    email: &'a str,
}

/// User API client over HTTP
pub struct HttpUserApi {
    client: Client,
    base_url: String,
}

impl HttpUserApi {
    /// Create a client for `config.base_url` with the configured timeout
    pub fn new(config: &ApiConfig) -> Result<Self, InfrastructureError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "API base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;
        debug!(base_url = %base_url, "HTTP user API initialized");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiFailure> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    url = %url,
                    code = error_codes::NETWORK_ERROR,
                    error = %e,
                    "User API request failed"
                );
                ApiFailure::new(None, None)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(url = %url, status = status.as_u16(), error = %e, "Failed to read response body");
            ApiFailure::new(Some(status.as_u16()), None)
        })?;

        if status.is_success() {
            return Ok(parse_success_body(&text));
        }

        let failure = failure_from_body(status, &text);
        debug!(
            url = %url,
            status = status.as_u16(),
            code = status_code_name(status),
            "User API returned an error"
        );
        Err(failure)
    }
}

#[async_trait]
impl UserApiTrait for HttpUserApi {
    async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<Value, ApiFailure> {
        debug!(email = %mask_identity(email), "Verifying OTP");
        self.post(VERIFY_OTP_PATH, &VerifyOtpRequest { email, otp_code })
            .await
    }

    async fn resend_otp(&self, email: &str) -> Result<Value, ApiFailure> {
        debug!(email = %mask_identity(email), "Requesting OTP resend");
        self.post(RESEND_OTP_PATH, &ResendOtpRequest { email }).await
    }
}

/// Success bodies are passed through; an empty body becomes `null`
fn parse_success_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Build the failure for a non-2xx response
pub(crate) fn failure_from_body(status: StatusCode, text: &str) -> ApiFailure {
    let message = serde_json::from_str::<ErrorResponse>(text)
        .ok()
        .and_then(|body| body.user_message().map(str::to_string));
    ApiFailure::new(Some(status.as_u16()), message)
}

fn status_code_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => error_codes::BAD_REQUEST,
        StatusCode::NOT_FOUND => error_codes::NOT_FOUND,
        StatusCode::UNPROCESSABLE_ENTITY => error_codes::VALIDATION_ERROR,
        _ => error_codes::INTERNAL_ERROR,
    }
}
