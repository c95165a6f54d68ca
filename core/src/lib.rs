//! # JobBoard Core
//!
//! OTP email verification workflow for the JobBoard web client.
//! This crate contains the workflow entities (code buffer, countdowns), the
//! submission state machine, the async host that drives them, and the user
//! session store the workflow reads from.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
