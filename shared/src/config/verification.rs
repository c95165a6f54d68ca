//! OTP verification workflow configuration

use serde::{Deserialize, Serialize};

/// Seconds before a new code may be requested
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 30;

/// Seconds shown after a successful verification before redirecting
pub const DEFAULT_SUCCESS_COUNTDOWN_SECONDS: u32 = 5;

/// Destination after a successful verification
pub const DEFAULT_SUCCESS_REDIRECT_PATH: &str = "/";

/// Timing and redirect settings for the verification workflow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Countdown start value for the resend gate
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: u32,

    /// Countdown start value after a successful verification
    #[serde(default = "default_success_countdown")]
    pub success_countdown_seconds: u32,

    /// Path navigated to once the success countdown reaches zero
    #[serde(default = "default_redirect_path")]
    pub success_redirect_path: String,

    /// Period of one countdown tick in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: default_resend_cooldown(),
            success_countdown_seconds: default_success_countdown(),
            success_redirect_path: default_redirect_path(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let resend_cooldown_seconds = std::env::var("OTP_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RESEND_COOLDOWN_SECONDS);
        let success_countdown_seconds = std::env::var("OTP_SUCCESS_COUNTDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SUCCESS_COUNTDOWN_SECONDS);
        let success_redirect_path = std::env::var("OTP_SUCCESS_REDIRECT_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_redirect_path);
        let tick_interval_ms = std::env::var("OTP_TICK_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_tick_interval_ms);

        Self {
            resend_cooldown_seconds,
            success_countdown_seconds,
            success_redirect_path,
            tick_interval_ms,
        }
    }

    /// Set the success redirect path
    pub fn with_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.success_redirect_path = path.into();
        self
    }

    /// Tick period as a `Duration`
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_resend_cooldown() -> u32 {
    DEFAULT_RESEND_COOLDOWN_SECONDS
}

fn default_success_countdown() -> u32 {
    DEFAULT_SUCCESS_COUNTDOWN_SECONDS
}

fn default_redirect_path() -> String {
    String::from(DEFAULT_SUCCESS_REDIRECT_PATH)
}

fn default_tick_interval_ms() -> u64 {
    1000
}
