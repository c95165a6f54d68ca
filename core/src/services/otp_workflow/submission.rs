//! Submission controller: validation, in-flight guard and resend gate

use jb_shared::validation::Validate;

use crate::domain::entities::{CodeBuffer, VerificationTimer};
use crate::domain::value_objects::{SessionSnapshot, SubmissionState};
use crate::errors::{DomainResult, WorkflowError};

use super::types::SubmitOutcome;

/// Owns the `SubmissionState` and is the only place it changes
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Decide whether a submit may dispatch a verify call
    ///
    /// Returns `Dispatched` after moving to `Submitting`; the caller must
    /// then send `buffer.assembled()`. The other outcomes leave the state
    /// alone. An invalid buffer is an error and never reaches the network.
    pub fn begin(
        &mut self,
        buffer: &CodeBuffer,
        session: &SessionSnapshot,
    ) -> DomainResult<SubmitOutcome> {
        match self.state {
            SubmissionState::Submitting => return Ok(SubmitOutcome::AlreadySubmitting),
            SubmissionState::Succeeded => return Ok(SubmitOutcome::AlreadyVerified),
            SubmissionState::Idle | SubmissionState::Failed { .. } => {}
        }

        if session.is_loading {
            return Ok(SubmitOutcome::Busy);
        }

        buffer.validate()?;

        self.state = SubmissionState::Submitting;
        Ok(SubmitOutcome::Dispatched)
    }

    /// Apply the result of the verify call
    ///
    /// Every rejection collapses into the generic failure message. Returns
    /// `true` when this call moved the state to `Succeeded`. A result that
    /// arrives while nothing is in flight is ignored.
    pub fn resolve(&mut self, result: &Result<(), String>) -> bool {
        if !self.state.is_submitting() {
            return false;
        }

        match result {
            Ok(()) => {
                self.state = SubmissionState::Succeeded;
                true
            }
            Err(_) => {
                self.state = SubmissionState::verification_failed();
                false
            }
        }
    }

    /// Gate a resend on the timer, resetting it when the gate is open
    ///
    /// The reset happens on dispatch, before the resend call resolves.
    pub fn resend(&self, timer: &mut VerificationTimer) -> DomainResult<u32> {
        if !timer.can_resend() {
            return Err(WorkflowError::ResendNotReady {
                remaining: timer.remaining(),
            });
        }

        timer.reset();
        Ok(timer.remaining())
    }
}
