//! Resend gate countdown.

use jb_shared::config::verification::DEFAULT_RESEND_COOLDOWN_SECONDS;
use serde::{Deserialize, Serialize};

/// Countdown that gates the resend action
///
/// Each tick removes one second and clamps at zero; ticks delivered after
/// zero are harmless. Resend is allowed only at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationTimer {
    /// Cooldown restored by `reset`
    start_seconds: u32,
    /// Seconds until resend is allowed
    remaining: u32,
}

impl Default for VerificationTimer {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_COOLDOWN_SECONDS)
    }
}

impl VerificationTimer {
    /// Create a timer that is already counting down from `start_seconds`
    pub fn new(start_seconds: u32) -> Self {
        Self {
            start_seconds,
            remaining: start_seconds,
        }
    }

    /// Set the remaining time back to the start value
    pub fn start(&mut self) {
        self.remaining = self.start_seconds;
    }

    /// Restart the countdown after a resend
    pub fn reset(&mut self) {
        self.start();
    }

    /// Advance one second, never going below zero
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Seconds left before resend is allowed
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Start value used by `start` and `reset`
    /// Whether the resend action is open
    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining time as `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
