//! Traits for the collaborators the workflow depends on

use async_trait::async_trait;

use crate::domain::value_objects::SessionSnapshot;

/// Verify a code for an identity
#[async_trait]
pub trait VerifyAction: Send + Sync {
    /// Resolve `Ok` when the code is accepted; any `Err` means rejected
    async fn verify(&self, identity: &str, code: &str) -> Result<(), String>;
}

/// Ask for a new code to be sent to an identity
#[async_trait]
pub trait ResendAction: Send + Sync {
    async fn resend(&self, identity: &str) -> Result<(), String>;
}

/// Client-side navigation
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Read access to the shared user session store
pub trait SessionStateReader: Send + Sync {
    fn session_state(&self) -> SessionSnapshot;
}
