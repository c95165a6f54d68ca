//! Shared utilities and common types for the JobBoard web client
//!
//! This crate provides common functionality used across all client modules:
//! - Configuration types (environment, logging, verification timing, API)
//! - Error body structures returned by the backend
//! - Utility functions (OTP code checks, identity masking, validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiConfig, ApiProvider, AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{identity, otp, validation};
