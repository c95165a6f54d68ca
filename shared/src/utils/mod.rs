//! Common utility functions

pub mod identity;
pub mod otp;
pub mod validation;

// Re-export commonly used utilities
pub use identity::*;
pub use otp::*;
pub use validation::*;
