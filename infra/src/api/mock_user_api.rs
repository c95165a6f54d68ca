//! In-process user API for development and demos
//!
//! Accepts a single code. Without a configured code a random one is
//! generated and logged, standing in for the email the backend would send.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use jb_core::services::session::{ApiFailure, UserApiTrait};
use jb_shared::config::ApiConfig;
use jb_shared::identity::mask_identity;
use jb_shared::otp::is_otp_code;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Message returned for a rejected code, as the backend words it
pub const INVALID_CODE_MESSAGE: &str = "Invalid OTP code";

pub struct MockUserApi {
    code: Mutex<String>,
    fixed_code: bool,
    latency: Duration,
    verify_calls: Mutex<Vec<(String, String)>>,
    resend_calls: Mutex<Vec<String>>,
}

impl MockUserApi {
    /// Mock that accepts only `code`
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Mutex::new(code.into()),
            fixed_code: true,
            latency: Duration::ZERO,
            verify_calls: Mutex::new(Vec::new()),
            resend_calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock with a random code that changes on every resend
    pub fn random() -> Self {
        let mut api = Self::with_code(generate_code());
        api.fixed_code = false;
        info!(code = %api.current_code(), "[MOCK API] Generated OTP code");
        api
    }

    /// Use `API_MOCK_CODE` when it is a valid six-digit code, otherwise a
    /// random one
    pub fn from_config(config: &ApiConfig) -> Self {
        match config.mock_code.as_deref() {
            Some(code) if is_otp_code(code) => Self::with_code(code),
            Some(code) => {
                warn!(code = %code, "Ignoring malformed mock OTP code");
                Self::random()
            }
            None => Self::random(),
        }
    }

    /// Delay every call, to make the loading state observable
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Code currently accepted
    pub fn current_code(&self) -> String {
        lock(&self.code).clone()
    }

    pub fn verify_calls(&self) -> Vec<(String, String)> {
        lock(&self.verify_calls).clone()
    }

    pub fn resend_calls(&self) -> Vec<String> {
        lock(&self.resend_calls).clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl UserApiTrait for MockUserApi {
    async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<Value, ApiFailure> {
        lock(&self.verify_calls).push((email.to_string(), otp_code.to_string()));
        self.simulate_latency().await;

        if otp_code == self.current_code() {
            info!(email = %mask_identity(email), "[MOCK API] OTP verified");
            Ok(json!({
                "email": email,
                "is_verified": true,
            }))
        } else {
            Err(ApiFailure::new(
                Some(400),
                Some(INVALID_CODE_MESSAGE.to_string()),
            ))
        }
    }

    async fn resend_otp(&self, email: &str) -> Result<Value, ApiFailure> {
        lock(&self.resend_calls).push(email.to_string());
        self.simulate_latency().await;

        if !self.fixed_code {
            *lock(&self.code) = generate_code();
        }
        info!(
            email = %mask_identity(email),
            code = %self.current_code(),
            "[MOCK API] OTP sent"
        );
        Ok(json!({ "message": "OTP sent successfully" }))
    }
}

fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
