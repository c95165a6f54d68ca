//! Synchronous state machine behind one workflow instance
//!
//! Every mutation of the buffer, the timers and the submission state goes
//! through a method here. The async host in `workflow.rs` only decides when
//! to call them.

use crate::domain::entities::{CodeBuffer, SuccessCountdown, VerificationTimer};
use crate::domain::value_objects::{Redirect, SessionSnapshot};
use crate::errors::DomainResult;

use super::config::OtpWorkflowConfig;
use super::submission::SubmissionController;
use super::types::{SubmitOutcome, WorkflowSnapshot};

/// Synchronous state of one workflow instance
///
/// Every mutation goes through the transition methods below; the async host
/// only locks it, calls one of them and publishes the resulting snapshot.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    /// The six code slots and the focused index
    buffer: CodeBuffer,
    /// Resend cooldown
    timer: VerificationTimer,
    /// Submission lifecycle and the resend gate
    controller: SubmissionController,
    /// Present once verification has succeeded
    success: Option<SuccessCountdown>,
    /// Inline message shown under the code fields
    field_error: Option<String>,
    /// Starting value for the success countdown
    success_countdown_seconds: u32,
    /// Route navigated to when the success countdown ends
    redirect_path: String,
}

impl WorkflowState {
    /// Create the state for a freshly mounted instance
    ///
    /// # Arguments
    ///
    /// * `config` - Workflow settings; the timer starts at its cooldown
    pub fn new(config: &OtpWorkflowConfig) -> Self {
        Self {
            buffer: CodeBuffer::new(),
            timer: VerificationTimer::new(config.resend_cooldown_seconds),
            controller: SubmissionController::new(),
            success: None,
            field_error: None,
            success_countdown_seconds: config.success_countdown_seconds,
            redirect_path: config.success_redirect_path.clone(),
        }
    }

    pub fn buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    pub fn success_countdown(&self) -> Option<&SuccessCountdown> {
        self.success.as_ref()
    }

    pub fn field_error(&self) -> Option<&str> {
        self.field_error.as_deref()
    }

    pub fn set_digit(&mut self, index: usize, input: &str) -> DomainResult<usize> {
        let focus = self.buffer.set_digit(index, input)?;
        self.field_error = None;
        Ok(focus)
    }

    pub fn backspace(&mut self, index: usize) -> DomainResult<usize> {
        let focus = self.buffer.backspace(index)?;
        Ok(focus)
    }

    pub fn focus(&mut self, index: usize) -> DomainResult<usize> {
        Ok(self.buffer.focus_slot(index)?)
    }

    pub fn paste(&mut self, text: &str) -> bool {
        let filled = self.buffer.paste_bulk(text);
        if filled {
            self.field_error = None;
        }
        filled
    }

    /// Start a submission; on `Dispatched` the code to send is returned too
    pub fn begin_submit(
        &mut self,
        session: &SessionSnapshot,
    ) -> DomainResult<(SubmitOutcome, Option<String>)> {
        match self.controller.begin(&self.buffer, session) {
            Ok(SubmitOutcome::Dispatched) => {
                self.field_error = None;
                Ok((SubmitOutcome::Dispatched, Some(self.buffer.assembled())))
            }
            Ok(outcome) => Ok((outcome, None)),
            Err(e) => {
                self.field_error = e.field_message();
                Err(e)
            }
        }
    }

    /// Apply a verify result; returns `true` if the success countdown started
    pub fn finish_submit(&mut self, result: &Result<(), String>) -> bool {
        let succeeded = self.controller.resolve(result);
        if succeeded {
            self.field_error = None;
            self.success = Some(SuccessCountdown::new(
                self.success_countdown_seconds,
                self.redirect_path.clone(),
            ));
        }
        succeeded
    }

    /// Open the resend gate check and reset the timer
    pub fn begin_resend(&mut self) -> DomainResult<u32> {
        self.controller.resend(&mut self.timer)
    }

    pub fn tick_timer(&mut self) -> u32 {
        self.timer.tick()
    }

    /// Advance the success countdown; the redirect comes out at most once
    pub fn tick_success(&mut self) -> Option<Redirect> {
        self.success.as_mut().and_then(SuccessCountdown::tick)
    }

    /// Whether the success countdown has handed out its redirect
    pub fn redirect_fired(&self) -> bool {
        self.success.as_ref().is_some_and(SuccessCountdown::has_fired)
    }

    pub fn snapshot(&self, config: &OtpWorkflowConfig, session: &SessionSnapshot) -> WorkflowSnapshot {
        let submission = self.controller.state().clone();
        WorkflowSnapshot {
            title: config.title().to_string(),
            description: config.description().to_string(),
            slots: self.buffer.slots(),
            focus: self.buffer.focus(),
            field_error: self.field_error.clone(),
            submit_disabled: submission.is_submitting() || session.is_loading,
            submission,
            session_error: session.error.clone(),
            success_countdown: self.success.as_ref().map(SuccessCountdown::remaining),
            resend_remaining: self.timer.remaining(),
            timer_display: self.timer.display(),
            can_resend: self.timer.can_resend(),
        }
    }
}
