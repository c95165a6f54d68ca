//! Client services containing the verification workflow and session state.

pub mod otp_workflow;
pub mod session;

// Re-export commonly used types
pub use otp_workflow::{
    Navigator, OtpWorkflow, OtpWorkflowConfig, ResendAction, ResendDispatch,
    SessionStateReader, SubmitOutcome, VerifyAction, WorkflowDeps, WorkflowSnapshot,
};
pub use session::{
    ApiFailure, SessionBoundResend, SessionBoundVerify, SessionRequest, UserApiTrait,
    UserSession, UserSessionStore,
};
