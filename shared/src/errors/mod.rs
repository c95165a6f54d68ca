//! Error body structures returned by the backend

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error body returned by the user API on a non-success status
///
/// Every field is optional; the backend sends `message` for most failures
/// and `detail` or per-field `errors` for framework-level rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Framework-level detail string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Field-level errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// The user-facing message, if the backend sent one
    ///
    /// Only `message` counts; `detail` and `errors` are diagnostic.
    pub fn user_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Error codes used when logging API failures
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
}
