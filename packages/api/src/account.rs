//! Account operations behind the profile, settings and "forgot password"
//! actions. Forms are validated first; an invalid form never reaches the
//! provider.

use store::validation::is_valid_email;
use store::FieldErrors;

use crate::auth::{AuthError, IdentityProvider, ProviderErrorCode};
use crate::forms::{ChangePasswordForm, EditProfileForm};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("E-post mangler")]
    MissingEmail,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl AccountError {
    /// Longer toast description, where the title alone says too little.
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            Self::MissingEmail => {
                Some("Vennligst skriv inn din e-postadresse for å tilbakestille passordet.")
            }
            _ => None,
        }
    }
}

/// Changes the password of the signed-in user and clears the form on
/// success.
pub async fn change_password<P: IdentityProvider>(
    provider: &P,
    form: &mut ChangePasswordForm,
) -> Result<(), AccountError> {
    form.validate().map_err(AccountError::Invalid)?;
    match provider.update_password(&form.new_password).await {
        Ok(()) => {
            form.clear();
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = ?err, "password change failed");
            Err(AccountError::Auth(password_error(err)))
        }
    }
}

fn password_error(err: AuthError) -> AuthError {
    match err.code() {
        Some(ProviderErrorCode::RequiresRecentLogin) | Some(ProviderErrorCode::WeakPassword) => err,
        _ => AuthError::PasswordChangeFailed,
    }
}

/// Stores the new display name. The session picks it up from the provider's
/// next session event. Returns the stored name.
pub async fn update_profile<P: IdentityProvider>(
    provider: &P,
    form: &EditProfileForm,
) -> Result<String, AccountError> {
    let name = form.validate().map_err(AccountError::Invalid)?;
    provider.update_display_name(&name).await?;
    Ok(name)
}

/// Asks the provider to mail a reset link. The returned notice is the same
/// whether or not an account exists for `email`.
pub async fn request_password_reset<P: IdentityProvider>(
    provider: &P,
    email: &str,
) -> Result<String, AccountError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AccountError::MissingEmail);
    }
    if let Err(err) = provider.send_password_reset_email(email).await {
        tracing::debug!(error = ?err, "password reset not sent");
    }
    Ok(format!(
        "Hvis en konto med e-posten {email} eksisterer, har vi sendt instruksjoner for \
         tilbakestilling av passord. Sjekk din innboks (og spamfilter)."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FIELD_CONFIRM_PASSWORD;
    use crate::models::UserInfo;
    use crate::testing::spy;

    #[tokio::test]
    async fn test_mismatched_confirmation_never_calls_provider() {
        let idp = spy();
        idp.create_account("t@example.com", "secret1").await.unwrap();
        let mut form = ChangePasswordForm {
            new_password: "newsecret".into(),
            confirm_password: "different".into(),
        };

        let err = change_password(&idp, &mut form).await.unwrap_err();
        let AccountError::Invalid(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.get(FIELD_CONFIRM_PASSWORD).is_some());
        assert_eq!(idp.calls("update_password"), 0);
        assert_eq!(form.new_password, "newsecret");
    }

    #[tokio::test]
    async fn test_change_password_clears_form() {
        let idp = spy();
        idp.create_account("t@example.com", "secret1").await.unwrap();
        let mut form = ChangePasswordForm {
            new_password: "newsecret".into(),
            confirm_password: "newsecret".into(),
        };
        change_password(&idp, &mut form).await.unwrap();
        assert_eq!(form, ChangePasswordForm::default());
        assert_eq!(idp.calls("update_password"), 1);
    }

    #[tokio::test]
    async fn test_change_password_error_messages() {
        let idp = spy();
        idp.create_account("t@example.com", "secret1").await.unwrap();
        let form = ChangePasswordForm {
            new_password: "newsecret".into(),
            confirm_password: "newsecret".into(),
        };

        idp.fail_password_update(ProviderErrorCode::RequiresRecentLogin);
        let err = change_password(&idp, &mut form.clone()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Denne handlingen krever nylig innlogging. Vennligst logg ut og inn igjen, og prøv på nytt."
        );

        idp.fail_password_update(ProviderErrorCode::WeakPassword);
        let err = change_password(&idp, &mut form.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "Passordet er for svakt. Velg et sterkere passord.");

        idp.fail_password_update(ProviderErrorCode::NetworkRequestFailed);
        let err = change_password(&idp, &mut form.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "En feil oppstod under endring av passord.");
    }

    #[tokio::test]
    async fn test_update_profile_reaches_session() {
        let idp = spy();
        idp.create_account("t@example.com", "secret1").await.unwrap();
        let user = UserInfo::from(&idp.current_user().unwrap());
        let mut form = EditProfileForm::for_user(&user);
        form.name = "  Ny Navn ".into();

        assert_eq!(update_profile(&idp, &form).await, Ok("Ny Navn".to_string()));
        let mut sub = idp.subscribe();
        let latest = sub.next().await.flatten().unwrap();
        assert_eq!(latest.display_name.as_deref(), Some("Ny Navn"));

        form.name = "N".into();
        assert!(matches!(
            update_profile(&idp, &form).await,
            Err(AccountError::Invalid(_))
        ));
        assert_eq!(idp.calls("update_display_name"), 1);
    }

    #[tokio::test]
    async fn test_reset_notice_is_neutral() {
        let idp = spy();
        idp.create_account("t@example.com", "secret1").await.unwrap();

        let known = request_password_reset(&idp, "t@example.com").await.unwrap();
        let unknown = request_password_reset(&idp, "nobody@x.com").await.unwrap();
        assert_eq!(
            known.replace("t@example.com", ""),
            unknown.replace("nobody@x.com", "")
        );
        assert_eq!(idp.outbox(), vec!["t@example.com".to_string()]);

        let missing = request_password_reset(&idp, "").await;
        assert_eq!(missing, Err(AccountError::MissingEmail));
        assert_eq!(idp.calls("send_password_reset_email"), 2);
    }
}
