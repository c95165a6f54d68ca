//! Submission state machine for one verification workflow.

use serde::{Deserialize, Serialize};

/// Message shown for every rejected verify call, whatever the cause
pub const VERIFICATION_FAILED_MESSAGE: &str = "Verification failed";

/// Where a submission stands
///
/// `Idle`/`Failed` -> `Submitting` on submit, `Submitting` -> `Succeeded` or
/// `Failed` when the verify call resolves. `Succeeded` is terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Failed { message: String },
    Succeeded,
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The generic failure state
    pub fn verification_failed() -> Self {
        SubmissionState::Failed {
            message: VERIFICATION_FAILED_MESSAGE.to_string(),
        }
    }
}
