use std::future::Future;

use tokio::sync::watch;

use super::AuthError;
use crate::models::ProviderUser;

/// Client side of the identity provider. Every call is a single
/// request/response round trip; session changes are observed through
/// [`IdentityProvider::subscribe`].
pub trait IdentityProvider {
    /// Creates the account and signs it in.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<ProviderUser, AuthError>>;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<ProviderUser, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    /// Sets the display name of the current user.
    fn update_display_name(&self, name: &str) -> impl Future<Output = Result<(), AuthError>>;

    /// Replaces the password of the current user.
    fn update_password(&self, new_password: &str) -> impl Future<Output = Result<(), AuthError>>;

    fn send_password_reset_email(&self, email: &str)
        -> impl Future<Output = Result<(), AuthError>>;

    fn current_user(&self) -> Option<ProviderUser>;

    fn subscribe(&self) -> SessionSubscription;
}

/// Stream of session changes. The first [`next`](Self::next) yields the
/// current session right away; later calls wait for the next change.
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<Option<ProviderUser>>,
    primed: bool,
}

impl SessionSubscription {
    pub fn new(rx: watch::Receiver<Option<ProviderUser>>) -> Self {
        Self { rx, primed: false }
    }

    /// `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<Option<ProviderUser>> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(uid: &str) -> ProviderUser {
        ProviderUser {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_first_next_is_immediate_then_waits_for_change() {
        let (tx, rx) = watch::channel(Some(user("a")));
        let mut sub = SessionSubscription::new(rx);
        assert_eq!(sub.next().await, Some(Some(user("a"))));

        tx.send_replace(None);
        assert_eq!(sub.next().await, Some(None));

        drop(tx);
        assert_eq!(sub.next().await, None);
    }
}
