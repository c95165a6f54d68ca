//! Read-only view of the shared user session store.

use serde::{Deserialize, Serialize};

/// The two session flags the workflow reads
///
/// `is_loading` disables the submit control; `error` is the latest message
/// reported by the store, shown above the submit control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub is_loading: bool,
    pub error: Option<String>,
}
