//! # In-process identity provider
//!
//! [`MemoryIdentity`] keeps accounts in memory, keyed by lower-cased email,
//! with Argon2id password hashes. It behaves like a hosted email/password
//! provider: the same error codes, a "recent login" requirement for password
//! changes and a session broadcast to every subscriber. Reset mails are not
//! sent; the addresses land in an outbox.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use argon2::Argon2;
use chrono::{DateTime, Utc};
use store::validation::{char_len, is_valid_email};
use tokio::sync::watch;
use uuid::Uuid;

use super::identity::{IdentityProvider, SessionSubscription};
use super::password::{hash_password, verify_password};
use super::{AuthError, ProviderErrorCode};
use crate::models::ProviderUser;

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user: ProviderUser,
    password_hash: String,
}

struct Current {
    key: String,
    signed_in_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<Current>,
    outbox: Vec<String>,
}

struct Inner {
    state: Mutex<State>,
    sessions: watch::Sender<Option<ProviderUser>>,
    argon2: Argon2<'static>,
    recent_login: Duration,
}

#[derive(Clone)]
pub struct MemoryIdentity {
    inner: Arc<Inner>,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

fn provider_error(code: ProviderErrorCode) -> AuthError {
    AuthError::Provider(code)
}

fn key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl MemoryIdentity {
    /// Provider whose password changes require a sign-in within
    /// `recent_login`.
    pub fn new(recent_login: Duration) -> Self {
        Self::with_hasher(recent_login, Argon2::default())
    }

    pub fn with_hasher(recent_login: Duration, argon2: Argon2<'static>) -> Self {
        let (sessions, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
                sessions,
                argon2,
                recent_login,
            }),
        }
    }

    /// Addresses that were sent a password reset, oldest first.
    pub fn outbox(&self) -> Vec<String> {
        self.lock().outbox.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, user: Option<ProviderUser>) {
        self.inner.sessions.send_replace(user);
    }

    fn hash(&self, password: &str) -> Result<String, AuthError> {
        hash_password(&self.inner.argon2, password).map_err(AuthError::Internal)
    }

    fn is_recent(&self, signed_in_at: DateTime<Utc>) -> bool {
        let age = Utc::now().signed_duration_since(signed_in_at);
        age.to_std()
            .map(|age| age <= self.inner.recent_login)
            .unwrap_or(true)
    }

    #[cfg(test)]
    fn backdate_sign_in(&self, by: chrono::Duration) {
        if let Some(current) = self.lock().current.as_mut() {
            current.signed_in_at -= by;
        }
    }
}

impl IdentityProvider for MemoryIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(provider_error(ProviderErrorCode::InvalidEmail));
        }
        if char_len(password) < MIN_PASSWORD_LEN {
            return Err(provider_error(ProviderErrorCode::WeakPassword));
        }
        let key = key(email);
        if self.lock().accounts.contains_key(&key) {
            return Err(provider_error(ProviderErrorCode::EmailAlreadyInUse));
        }
        let password_hash = self.hash(password)?;

        let user = ProviderUser {
            uid: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
            display_name: None,
            photo_url: None,
        };
        {
            let mut state = self.lock();
            if state.accounts.contains_key(&key) {
                return Err(provider_error(ProviderErrorCode::EmailAlreadyInUse));
            }
            state.accounts.insert(
                key.clone(),
                Account {
                    user: user.clone(),
                    password_hash,
                },
            );
            state.current = Some(Current {
                key,
                signed_in_at: Utc::now(),
            });
        }
        tracing::info!(uid = %user.uid, "account created");
        self.broadcast(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, AuthError> {
        let key = key(email);
        let (user, password_hash) = {
            let state = self.lock();
            let account = state
                .accounts
                .get(&key)
                .ok_or_else(|| provider_error(ProviderErrorCode::UserNotFound))?;
            (account.user.clone(), account.password_hash.clone())
        };
        let matches = verify_password(&self.inner.argon2, password, &password_hash)
            .map_err(AuthError::Internal)?;
        if !matches {
            return Err(provider_error(ProviderErrorCode::InvalidCredential));
        }
        self.lock().current = Some(Current {
            key,
            signed_in_at: Utc::now(),
        });
        tracing::info!(uid = %user.uid, "signed in");
        self.broadcast(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let was_signed_in = self.lock().current.take().is_some();
        if was_signed_in {
            tracing::info!("signed out");
        }
        self.broadcast(None);
        Ok(())
    }

    async fn update_display_name(&self, name: &str) -> Result<(), AuthError> {
        let user = {
            let mut state = self.lock();
            let key = state
                .current
                .as_ref()
                .map(|current| current.key.clone())
                .ok_or(AuthError::NotSignedIn)?;
            let account = state.accounts.get_mut(&key).ok_or(AuthError::NotSignedIn)?;
            account.user.display_name = Some(name.to_string());
            account.user.clone()
        };
        tracing::info!(uid = %user.uid, "display name updated");
        self.broadcast(Some(user));
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), AuthError> {
        let (key, signed_in_at) = {
            let state = self.lock();
            let current = state.current.as_ref().ok_or(AuthError::NotSignedIn)?;
            (current.key.clone(), current.signed_in_at)
        };
        if !self.is_recent(signed_in_at) {
            return Err(provider_error(ProviderErrorCode::RequiresRecentLogin));
        }
        if char_len(new_password) < MIN_PASSWORD_LEN {
            return Err(provider_error(ProviderErrorCode::WeakPassword));
        }
        let password_hash = self.hash(new_password)?;
        let mut state = self.lock();
        let account = state.accounts.get_mut(&key).ok_or(AuthError::NotSignedIn)?;
        account.password_hash = password_hash;
        tracing::info!(uid = %account.user.uid, "password updated");
        Ok(())
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(provider_error(ProviderErrorCode::InvalidEmail));
        }
        let mut state = self.lock();
        if !state.accounts.contains_key(&key(email)) {
            return Err(provider_error(ProviderErrorCode::UserNotFound));
        }
        state.outbox.push(email.to_string());
        tracing::info!("password reset mail queued");
        Ok(())
    }

    fn current_user(&self) -> Option<ProviderUser> {
        let state = self.lock();
        let current = state.current.as_ref()?;
        state.accounts.get(&current.key).map(|a| a.user.clone())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.inner.sessions.subscribe())
    }
}
