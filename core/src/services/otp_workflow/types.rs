//! Types for workflow results and host-facing snapshots

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::CODE_LENGTH;
use crate::domain::value_objects::SubmissionState;

/// What a submit request did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// A verify call was dispatched
    Dispatched,
    /// A verify call is already in flight; nothing was sent
    AlreadySubmitting,
    /// The code was already accepted; nothing was sent
    AlreadyVerified,
    /// The session store reports a request in progress; nothing was sent
    Busy,
}

/// Result of dispatching a resend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResendDispatch {
    /// Seconds on the resend gate after the reset
    pub remaining: u32,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Everything a host needs to render the workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowSnapshot {
    pub title: String,
    pub description: String,
    pub slots: [Option<char>; CODE_LENGTH],
    pub focus: usize,
    /// Field-level message shown under the inputs
    pub field_error: Option<String>,
    pub submission: SubmissionState,
    /// Submit control disabled (in flight, or the session store is loading)
    pub submit_disabled: bool,
    /// Latest error reported by the session store
    pub session_error: Option<String>,
    /// Seconds until redirect, present only after success
    pub success_countdown: Option<u32>,
    pub resend_remaining: u32,
    pub timer_display: String,
    pub can_resend: bool,
}

impl WorkflowSnapshot {
    /// Message to show under the inputs: a validation message, or the
    /// verification failure
    pub fn inline_error(&self) -> Option<&str> {
        self.field_error
            .as_deref()
            .or_else(|| self.submission.error_message())
    }
}
