//! Domain entities owned by one verification workflow instance.

pub mod code_buffer;
pub mod success_countdown;
pub mod verification_timer;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use code_buffer::{CodeBuffer, CODE_LENGTH, FIELD_NAME, INCOMPLETE_MESSAGE, SLOT_MESSAGE};
pub use success_countdown::SuccessCountdown;
pub use verification_timer::VerificationTimer;
