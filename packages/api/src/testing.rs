//! Test double: an in-memory provider that counts calls and can be told to
//! fail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::password::light_hasher;
use crate::auth::{AuthError, IdentityProvider, MemoryIdentity, ProviderErrorCode, SessionSubscription};
use crate::models::ProviderUser;

#[derive(Clone)]
pub struct SpyIdentity {
    inner: MemoryIdentity,
    calls: Arc<Mutex<HashMap<&'static str, usize>>>,
    sign_out_fails: Arc<Mutex<bool>>,
    display_name_fails: Arc<Mutex<bool>>,
    password_error: Arc<Mutex<Option<ProviderErrorCode>>>,
}

pub fn spy() -> SpyIdentity {
    SpyIdentity {
        inner: MemoryIdentity::with_hasher(Duration::from_secs(300), light_hasher()),
        calls: Arc::default(),
        sign_out_fails: Arc::default(),
        display_name_fails: Arc::default(),
        password_error: Arc::default(),
    }
}

impl SpyIdentity {
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().get(op).copied().unwrap_or(0)
    }

    pub fn fail_sign_out(&self) {
        *self.sign_out_fails.lock().unwrap() = true;
    }

    pub fn fail_display_name(&self) {
        *self.display_name_fails.lock().unwrap() = true;
    }

    pub fn fail_password_update(&self, code: ProviderErrorCode) {
        *self.password_error.lock().unwrap() = Some(code);
    }

    pub fn outbox(&self) -> Vec<String> {
        self.inner.outbox()
    }

    fn record(&self, op: &'static str) {
        *self.calls.lock().unwrap().entry(op).or_default() += 1;
    }
}

impl IdentityProvider for SpyIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        self.record("create_account");
        self.inner.create_account(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        self.record("sign_in");
        self.inner.sign_in(email, password).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record("sign_out");
        if *self.sign_out_fails.lock().unwrap() {
            return Err(AuthError::Provider(ProviderErrorCode::NetworkRequestFailed));
        }
        self.inner.sign_out().await
    }

    async fn update_display_name(&self, name: &str) -> Result<(), AuthError> {
        self.record("update_display_name");
        if *self.display_name_fails.lock().unwrap() {
            return Err(AuthError::Provider(ProviderErrorCode::NetworkRequestFailed));
        }
        self.inner.update_display_name(name).await
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        self.record("update_password");
        let forced = self.password_error.lock().unwrap().clone();
        if let Some(code) = forced {
            return Err(AuthError::Provider(code));
        }
        self.inner.update_password(new_password).await
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthError> {
        self.record("send_password_reset_email");
        self.inner.send_password_reset_email(email).await
    }

    fn current_user(&self) -> Option<ProviderUser> {
        self.inner.current_user()
    }

    fn subscribe(&self) -> SessionSubscription {
        self.inner.subscribe()
    }
}
