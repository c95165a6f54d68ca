//! Workflow error types and error handling.

use jb_shared::validation::ValidationErrors;
use thiserror::Error;

/// Rejected keystroke or slot reference on the code buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeInputError {
    #[error("Slot index {index} out of range (expected 0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Must be 1 digit")]
    NotADigit { input: String },
}

/// Errors surfaced by the OTP verification workflow
///
/// A rejected verify call is not an error value: it becomes
/// `SubmissionState::Failed`. Resend failures never reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Input(#[from] CodeInputError),

    #[error("Resend available in {remaining} seconds")]
    ResendNotReady { remaining: u32 },

    #[error("Verification workflow has been torn down")]
    TornDown,

    #[error("Runtime error: {message}")]
    Runtime { message: String },

    #[error("Invalid workflow configuration: {message}")]
    Config { message: String },
}

impl From<ValidationErrors> for WorkflowError {
    fn from(errors: ValidationErrors) -> Self {
        WorkflowError::Validation(errors)
    }
}

impl WorkflowError {
    /// Field-level message to show next to the code inputs, if any
    pub fn field_message(&self) -> Option<String> {
        match self {
            WorkflowError::Validation(errors) => errors
                .first_message(crate::domain::entities::code_buffer::FIELD_NAME)
                .or_else(|| errors.errors().first().map(|e| e.message.as_str()))
                .map(str::to_string),
            WorkflowError::Input(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, WorkflowError>;
