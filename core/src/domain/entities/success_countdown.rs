//! Post-verification countdown that ends in a single redirect.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Redirect;

/// Countdown started when verification succeeds
///
/// The tick that brings it to zero yields the redirect; every later tick
/// yields nothing, so navigation can fire at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessCountdown {
    /// Seconds left before the redirect
    remaining: u32,
    /// Route the redirect points at
    destination: String,
    /// Set once the redirect has been handed out
    fired: bool,
}

impl SuccessCountdown {
    /// Create a new countdown
    ///
    /// # Arguments
    ///
    /// * `start_seconds` - Seconds shown when the countdown starts
    /// * `destination` - Route to navigate to when it reaches zero
    pub fn new(start_seconds: u32, destination: impl Into<String>) -> Self {
        Self {
            remaining: start_seconds,
            destination: destination.into(),
            fired: false,
        }
    }

    /// Advance one second
    pub fn tick(&mut self) -> Option<Redirect> {
        if self.fired {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.fired = true;
            return Some(Redirect::new(self.destination.clone()));
        }
        None
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the redirect has been handed out
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
