//! Value objects representing immutable domain concepts.

pub mod redirect;
pub mod session_snapshot;
pub mod submission_state;

// Re-export commonly used types
pub use redirect::Redirect;
pub use session_snapshot::SessionSnapshot;
pub use submission_state::{SubmissionState, VERIFICATION_FAILED_MESSAGE};
