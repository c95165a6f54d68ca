//! Configuration for the OTP verification workflow

use std::time::Duration;

use jb_shared::config::VerificationConfig;

/// Heading shown when the host does not supply one
pub const DEFAULT_TITLE: &str = "Verify your email";

/// Description shown when the host does not supply one
pub const DEFAULT_DESCRIPTION: &str = "Enter the 6-digit code we sent to your email";

/// Host-supplied configuration for one workflow instance
#[derive(Debug, Clone)]
pub struct OtpWorkflowConfig {
    /// Opaque identity being verified (an email address in practice)
    pub identity: String,
    /// Where to navigate once the success countdown reaches zero
    pub success_redirect_path: String,
    /// Optional heading override
    pub title: Option<String>,
    /// Optional description override
    pub description: Option<String>,
    /// Start value of the resend gate
    pub resend_cooldown_seconds: u32,
    /// Start value of the success countdown
    pub success_countdown_seconds: u32,
    /// Period of one countdown tick
    pub tick_interval: Duration,
}

impl OtpWorkflowConfig {
    /// Configuration with default timing, redirecting to the application root
    pub fn new(identity: impl Into<String>) -> Self {
        Self::from_settings(identity, &VerificationConfig::default())
    }

    /// Configuration using loaded verification settings
    pub fn from_settings(identity: impl Into<String>, settings: &VerificationConfig) -> Self {
        Self {
            identity: identity.into(),
            success_redirect_path: settings.success_redirect_path.clone(),
            title: None,
            description: None,
            resend_cooldown_seconds: settings.resend_cooldown_seconds,
            success_countdown_seconds: settings.success_countdown_seconds,
            tick_interval: settings.tick_interval(),
        }
    }

    pub fn with_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.success_redirect_path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}
