//! Shared user session store

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::value_objects::SessionSnapshot;
use crate::services::otp_workflow::SessionStateReader;

/// Request kinds the store tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRequest {
    VerifyOtp,
    ResendOtp,
}

/// User session state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserSession {
    pub user: Option<Value>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    in_flight: usize,
}

/// Session store shared by the pages of the client
///
/// Requests move it through pending, then fulfilled or rejected.
/// `is_loading` stays set while any tracked request is in flight.
#[derive(Debug, Default)]
pub struct UserSessionStore {
    inner: Mutex<UserSession>,
}

impl UserSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, UserSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current session
    pub fn state(&self) -> UserSession {
        self.lock().clone()
    }

    pub fn pending(&self, request: SessionRequest) {
        let mut session = self.lock();
        session.in_flight += 1;
        session.is_loading = true;
        debug!(request = ?request, in_flight = session.in_flight, "Session request pending");
    }

    /// A verify call succeeded: keep the user payload, clear the error
    ///
    /// Verification alone does not sign the user in.
    pub fn verify_fulfilled(&self, user: Value) {
        let mut session = self.lock();
        Self::settle(&mut session);
        session.user = Some(user);
        session.error = None;
        session.is_authenticated = false;
    }

    pub fn resend_fulfilled(&self) {
        let mut session = self.lock();
        Self::settle(&mut session);
        debug!("OTP resent successfully");
    }

    /// A request failed; `message` is the backend's message, if it sent one
    pub fn rejected(&self, request: SessionRequest, message: Option<String>) {
        let mut session = self.lock();
        Self::settle(&mut session);
        debug!(request = ?request, "Session request rejected");
        session.error = message;
    }

    fn settle(session: &mut UserSession) {
        session.in_flight = session.in_flight.saturating_sub(1);
        session.is_loading = session.in_flight > 0;
    }
}

impl SessionStateReader for UserSessionStore {
    fn session_state(&self) -> SessionSnapshot {
        let session = self.lock();
        SessionSnapshot {
            is_loading: session.is_loading,
            error: session.error.clone(),
        }
    }
}
