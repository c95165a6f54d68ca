//! Navigation request produced by the success countdown.

use serde::{Deserialize, Serialize};

/// A one-time request to leave the verification page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Route handed to the navigator, e.g. `/`
    pub path: String,
}

impl Redirect {
    /// Create a redirect to `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
