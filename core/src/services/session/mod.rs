//! User session store and the actions that feed it
//!
//! The store mirrors the user-facing session flags (`is_loading`, `error`,
//! the verified user payload). The session-bound actions wrap a user API
//! client and record each request's progress in the store, so the
//! verification workflow can read the flags through `SessionStateReader`.

mod actions;
mod store;
mod traits;


pub use actions::{SessionBoundResend, SessionBoundVerify};
pub use store::{SessionRequest, UserSession, UserSessionStore};
pub use traits::{ApiFailure, UserApiTrait};
