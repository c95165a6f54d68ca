//! Verify and resend actions that record their progress in the session store

use std::sync::Arc;

use async_trait::async_trait;

use crate::services::otp_workflow::{ResendAction, VerifyAction};

use super::store::{SessionRequest, UserSessionStore};
use super::traits::UserApiTrait;

/// Verify action backed by the user API
pub struct SessionBoundVerify<A: UserApiTrait + ?Sized> {
    api: Arc<A>,
    store: Arc<UserSessionStore>,
}

impl<A: UserApiTrait + ?Sized> SessionBoundVerify<A> {
    pub fn new(api: Arc<A>, store: Arc<UserSessionStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl<A: UserApiTrait + ?Sized + 'static> VerifyAction for SessionBoundVerify<A> {
    async fn verify(&self, identity: &str, code: &str) -> Result<(), String> {
        self.store.pending(SessionRequest::VerifyOtp);
        match self.api.verify_otp(identity, code).await {
            Ok(user) => {
                self.store.verify_fulfilled(user);
                Ok(())
            }
            Err(failure) => {
                self.store
                    .rejected(SessionRequest::VerifyOtp, failure.message.clone());
                Err(failure.to_string())
            }
        }
    }
}

/// Resend action backed by the user API
pub struct SessionBoundResend<A: UserApiTrait + ?Sized> {
    api: Arc<A>,
    store: Arc<UserSessionStore>,
}

impl<A: UserApiTrait + ?Sized> SessionBoundResend<A> {
    pub fn new(api: Arc<A>, store: Arc<UserSessionStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl<A: UserApiTrait + ?Sized + 'static> ResendAction for SessionBoundResend<A> {
    async fn resend(&self, identity: &str) -> Result<(), String> {
        self.store.pending(SessionRequest::ResendOtp);
        match self.api.resend_otp(identity).await {
            Ok(_) => {
                self.store.resend_fulfilled();
                Ok(())
            }
            Err(failure) => {
                self.store
                    .rejected(SessionRequest::ResendOtp, failure.message.clone());
                Err(failure.to_string())
            }
        }
    }
}
