//! # Session context
//!
//! [`SessionContext`] is the single source of truth for who is signed in. It is
//! handed down the UI tree as a context value and wraps an
//! [`IdentityProvider`]. The held user is never written by `login`, `signup`
//! or `logout` directly: it follows the provider's session events through a
//! [`SessionWatcher`], which turns each event into a [`SessionState`].
//! A logout the provider could not complete still signs the tab out: the
//! context raises a local signed-out flag that the watcher folds in.
//!
//! ```text
//! Loading ──event(user)──▶ Authenticated
//!    │                          │  ▲
//!    └──event(none)──▶ Unauthenticated
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::auth::{AuthError, IdentityProvider, ProviderErrorCode, SessionSubscription};
use crate::models::{ProviderUser, UserInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What a protected page should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Wait,
    RedirectToLogin,
    Allow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    /// True until the provider has reported the first session.
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match (&self.user, self.loading) {
            (_, true) => SessionStatus::Loading,
            (Some(_), false) => SessionStatus::Authenticated,
            (None, false) => SessionStatus::Unauthenticated,
        }
    }

    pub fn gate(&self) -> Gate {
        match self.status() {
            SessionStatus::Loading => Gate::Wait,
            SessionStatus::Unauthenticated => Gate::RedirectToLogin,
            SessionStatus::Authenticated => Gate::Allow,
        }
    }

    /// Login and signup pages send a signed-in user on to the dashboard.
    pub fn already_signed_in(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }
}

/// Where the UI should go after a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Home,
    Login,
    Signup,
    Dashboard,
    Profile,
    Settings,
    Scan,
    ListItem,
    ReturnItem(String),
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Profile => "/dashboard/profile".to_string(),
            Self::Settings => "/dashboard/settings".to_string(),
            Self::Scan => "/scan".to_string(),
            Self::ListItem => "/list-item".to_string(),
            Self::ReturnItem(id) => format!("/return-item/{id}"),
        }
    }
}

/// Turns provider session events into [`SessionState`]s. Dropping the
/// watcher unsubscribes.
#[derive(Debug)]
pub struct SessionWatcher {
    subscription: SessionSubscription,
    signed_out: watch::Receiver<bool>,
    latest: Option<ProviderUser>,
    primed: bool,
}

impl SessionWatcher {
    /// Next state; the first call resolves immediately. `None` once the
    /// provider is gone.
    pub async fn next(&mut self) -> Option<SessionState> {
        if self.primed {
            tokio::select! {
                event = self.subscription.next() => self.latest = event?,
                changed = self.signed_out.changed() => changed.ok()?,
            }
        } else {
            self.latest = self.subscription.next().await?;
            self.primed = true;
        }
        let forced_out = *self.signed_out.borrow_and_update();
        let user = self
            .latest
            .as_ref()
            .filter(|_| !forced_out)
            .map(UserInfo::from);
        tracing::info!(signed_in = user.is_some(), "session state changed");
        Some(SessionState {
            user,
            loading: false,
        })
    }
}

#[derive(Clone)]
pub struct SessionContext<P> {
    provider: P,
    /// Set by a logout the provider failed, cleared by the next sign-in.
    signed_out: Arc<watch::Sender<bool>>,
}

impl<P: IdentityProvider> SessionContext<P> {
    pub fn new(provider: P) -> Self {
        let (signed_out, _) = watch::channel(false);
        Self {
            provider,
            signed_out: Arc::new(signed_out),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn watch(&self) -> SessionWatcher {
        SessionWatcher {
            subscription: self.provider.subscribe(),
            signed_out: self.signed_out.subscribe(),
            latest: None,
            primed: false,
        }
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        if *self.signed_out.borrow() {
            return None;
        }
        self.provider.current_user().as_ref().map(UserInfo::from)
    }

    fn set_signed_out(&self, flag: bool) {
        self.signed_out.send_if_modified(|current| {
            let changed = *current != flag;
            *current = flag;
            changed
        });
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Navigation, AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingLoginPassword);
        }
        match self.provider.sign_in(email.trim(), password).await {
            Ok(_) => {
                self.set_signed_out(false);
                Ok(Navigation::Dashboard)
            }
            Err(err) => {
                tracing::warn!(code = ?err.code().map(ProviderErrorCode::as_str), "login failed");
                Err(translate_login(err))
            }
        }
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Navigation, AuthError> {
        if password.is_empty() {
            return Err(AuthError::MissingSignupPassword);
        }
        let created = self.provider.create_account(email.trim(), password).await;
        if let Err(err) = created {
            tracing::warn!(code = ?err.code().map(ProviderErrorCode::as_str), "signup failed");
            return Err(translate_signup(err));
        }
        self.set_signed_out(false);
        // Signed in from here on, with or without a name.
        if let Err(err) = self.provider.update_display_name(name.trim()).await {
            tracing::warn!(error = %err, "setting display name after signup failed");
        }
        Ok(Navigation::Dashboard)
    }

    /// Always ends on the login page with the session cleared, even if the
    /// provider call fails.
    pub async fn logout(&self) -> Navigation {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!(error = %err, "logout failed, signing out locally");
            self.set_signed_out(true);
        }
        Navigation::Login
    }
}

fn translate_login(err: AuthError) -> AuthError {
    match err.code() {
        Some(code) if code.is_bad_credentials() => AuthError::InvalidCredentials,
        _ => err,
    }
}

fn translate_signup(err: AuthError) -> AuthError {
    match err.code() {
        Some(ProviderErrorCode::EmailAlreadyInUse) => AuthError::EmailInUse,
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spy, SpyIdentity};

    async fn ready(ctx: &SessionContext<SpyIdentity>) -> SessionWatcher {
        let mut watcher = ctx.watch();
        assert_eq!(watcher.next().await.unwrap().status(), SessionStatus::Unauthenticated);
        watcher
    }

    #[test]
    fn test_state_starts_loading() {
        let state = SessionState::default();
        assert_eq!(state.gate(), Gate::Wait);
        assert!(!state.already_signed_in());
    }

    #[tokio::test]
    async fn test_signup_establishes_one_session() {
        let ctx = SessionContext::new(spy());
        let mut watcher = ready(&ctx).await;

        let nav = ctx.signup("Test User", "t@example.com", "secret1").await;
        assert_eq!(nav, Ok(Navigation::Dashboard));
        assert_eq!(nav.unwrap().path(), "/dashboard");

        // The watch channel coalesces; the latest event carries the name.
        let named = watcher.next().await.unwrap();
        assert_eq!(named.gate(), Gate::Allow);
        let user = named.user.unwrap();
        assert_eq!(user.name.as_deref(), Some("Test User"));
        assert_eq!(user.email, "t@example.com");
        assert_eq!(ctx.provider().calls("create_account"), 1);
    }

    #[tokio::test]
    async fn test_signup_with_taken_email() {
        let ctx = SessionContext::new(spy());
        ctx.signup("Test User", "t@example.com", "secret1").await.unwrap();
        ctx.logout().await;

        let again = ctx.signup("Other", "t@example.com", "secret2").await;
        assert_eq!(again, Err(AuthError::EmailInUse));
        assert_eq!(
            AuthError::EmailInUse.to_string(),
            "Denne e-postadressen er allerede i bruk."
        );
    }

    #[tokio::test]
    async fn test_login_with_unknown_account() {
        let ctx = SessionContext::new(spy());
        let _watcher = ready(&ctx).await;

        let err = ctx.login("nobody@x.com", "wrong").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Ugyldig e-post eller passord.");
        assert!(ctx.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_hides_provider_code() {
        let ctx = SessionContext::new(spy());
        ctx.signup("Test User", "t@example.com", "secret1").await.unwrap();
        ctx.logout().await;

        let err = ctx.login("t@example.com", "wrong1").await.unwrap_err();
        assert!(!err.to_string().contains("invalid-credential"));
        assert_eq!(err, AuthError::InvalidCredentials);

        assert_eq!(
            ctx.login("t@example.com", "secret1").await,
            Ok(Navigation::Dashboard)
        );
    }

    #[tokio::test]
    async fn test_missing_password_never_reaches_provider() {
        let ctx = SessionContext::new(spy());
        assert_eq!(
            ctx.login("t@example.com", "").await,
            Err(AuthError::MissingLoginPassword)
        );
        assert_eq!(
            ctx.signup("Test User", "t@example.com", "").await,
            Err(AuthError::MissingSignupPassword)
        );
        assert_eq!(ctx.provider().calls("sign_in"), 0);
        assert_eq!(ctx.provider().calls("create_account"), 0);
    }

    #[tokio::test]
    async fn test_logout_always_goes_to_login() {
        let ctx = SessionContext::new(spy());
        assert_eq!(ctx.logout().await, Navigation::Login);

        ctx.signup("Test User", "t@example.com", "secret1").await.unwrap();
        let mut watcher = ctx.watch();
        assert_eq!(watcher.next().await.unwrap().gate(), Gate::Allow);

        assert_eq!(ctx.logout().await, Navigation::Login);
        let state = watcher.next().await.unwrap();
        assert_eq!(state.gate(), Gate::RedirectToLogin);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_logout_failure_still_navigates() {
        let ctx = SessionContext::new(spy());
        ctx.provider().fail_sign_out();
        assert_eq!(ctx.logout().await, Navigation::Login);
    }

    #[tokio::test]
    async fn test_failed_logout_clears_held_session() {
        let ctx = SessionContext::new(spy());
        ctx.signup("Test User", "t@example.com", "secret1").await.unwrap();
        let mut watcher = ctx.watch();
        assert_eq!(watcher.next().await.unwrap().gate(), Gate::Allow);

        ctx.provider().fail_sign_out();
        assert_eq!(ctx.logout().await, Navigation::Login);
        let state = watcher.next().await.unwrap();
        assert_eq!(state.gate(), Gate::RedirectToLogin);
        assert!(!state.already_signed_in());
        assert!(ctx.current_user().is_none());

        // Signing in again lifts the local sign-out.
        ctx.login("t@example.com", "secret1").await.unwrap();
        assert_eq!(watcher.next().await.unwrap().gate(), Gate::Allow);
        assert!(ctx.current_user().is_some());
    }

    #[tokio::test]
    async fn test_signup_survives_display_name_failure() {
        let ctx = SessionContext::new(spy());
        ctx.provider().fail_display_name();

        let nav = ctx.signup("Test User", "t@example.com", "secret1").await;
        assert_eq!(nav, Ok(Navigation::Dashboard));
        let user = ctx.current_user().unwrap();
        assert_eq!(user.email, "t@example.com");
        assert!(user.name.is_none());
        assert_eq!(ctx.provider().calls("update_display_name"), 1);
    }

    #[test]
    fn test_navigation_paths() {
        assert_eq!(Navigation::ReturnItem("item1".into()).path(), "/return-item/item1");
        assert_eq!(Navigation::Settings.path(), "/dashboard/settings");
    }
}
