//! OTP verification workflow
//!
//! This module provides the client-side email verification flow:
//! - A six-slot code buffer with focus movement and bulk paste
//! - A resend gate that counts down from 30 seconds
//! - A submission controller that allows one verify call in flight
//! - A success countdown that redirects exactly once
//!
//! Both countdowns run on driving clocks owned by the workflow instance and
//! are released when the instance is torn down.

mod clock;
mod config;
mod state;
mod submission;
mod traits;
mod types;
mod workflow;

#[cfg(test)]
mod tests;

pub use clock::DrivingClock;
pub use config::{OtpWorkflowConfig, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use state::WorkflowState;
pub use submission::SubmissionController;
pub use traits::{Navigator, ResendAction, SessionStateReader, VerifyAction};
pub use types::{ResendDispatch, SubmitOutcome, WorkflowSnapshot};
pub use workflow::{OtpWorkflow, WorkflowDeps};
