use std::fmt;

/// Error code reported by the identity provider.
///
/// Codes arrive either bare (`weak-password`) or namespaced
/// (`auth/weak-password`); both parse to the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderErrorCode {
    EmailAlreadyInUse,
    UserNotFound,
    WrongPassword,
    InvalidCredential,
    RequiresRecentLogin,
    WeakPassword,
    InvalidEmail,
    NetworkRequestFailed,
    TooManyRequests,
    Other(String),
}

impl ProviderErrorCode {
    pub fn parse(code: &str) -> Self {
        let code = code.strip_prefix("auth/").unwrap_or(code);
        match code {
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-credential" => Self::InvalidCredential,
            "requires-recent-login" => Self::RequiresRecentLogin,
            "weak-password" => Self::WeakPassword,
            "invalid-email" => Self::InvalidEmail,
            "network-request-failed" => Self::NetworkRequestFailed,
            "too-many-requests" => Self::TooManyRequests,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::EmailAlreadyInUse => "email-already-in-use",
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidCredential => "invalid-credential",
            Self::RequiresRecentLogin => "requires-recent-login",
            Self::WeakPassword => "weak-password",
            Self::InvalidEmail => "invalid-email",
            Self::NetworkRequestFailed => "network-request-failed",
            Self::TooManyRequests => "too-many-requests",
            Self::Other(code) => code,
        }
    }

    /// Wrong email or password, reported without telling which.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound | Self::WrongPassword | Self::InvalidCredential
        )
    }

    /// Localized text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => "Denne e-postadressen er allerede i bruk.",
            Self::UserNotFound | Self::WrongPassword | Self::InvalidCredential => {
                "Ugyldig e-post eller passord."
            }
            Self::RequiresRecentLogin => {
                "Denne handlingen krever nylig innlogging. Vennligst logg ut og inn igjen, \
                 og prøv på nytt."
            }
            Self::WeakPassword => "Passordet er for svakt. Velg et sterkere passord.",
            Self::InvalidEmail => "Ugyldig e-postadresse.",
            Self::NetworkRequestFailed => "Nettverksfeil. Sjekk tilkoblingen og prøv igjen.",
            Self::TooManyRequests => "For mange forsøk. Vent litt og prøv igjen.",
            Self::Other(_) => "En ukjent feil oppstod.",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "auth/{}", self.as_str())
    }
}

/// Errors of the session and account operations. `Display` is the text shown
/// to the user; the raw provider code only appears in logs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("Ugyldig e-post eller passord.")]
    InvalidCredentials,
    #[error("Denne e-postadressen er allerede i bruk.")]
    EmailInUse,
    #[error("Passord er påkrevd for innlogging.")]
    MissingLoginPassword,
    #[error("Passord er påkrevd for registrering.")]
    MissingSignupPassword,
    #[error("Bruker ikke logget inn.")]
    NotSignedIn,
    #[error("{}", .0.message())]
    Provider(ProviderErrorCode),
    #[error("En feil oppstod under endring av passord.")]
    PasswordChangeFailed,
    #[error("En intern feil oppstod.")]
    Internal(String),
}

impl AuthError {
    pub fn provider(code: ProviderErrorCode) -> Self {
        Self::Provider(code)
    }

    pub fn code(&self) -> Option<&ProviderErrorCode> {
        match self {
            Self::Provider(code) => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_forms() {
        assert_eq!(
            ProviderErrorCode::parse("auth/wrong-password"),
            ProviderErrorCode::WrongPassword
        );
        assert_eq!(
            ProviderErrorCode::parse("requires-recent-login"),
            ProviderErrorCode::RequiresRecentLogin
        );
        let other = ProviderErrorCode::parse("auth/quota-exceeded");
        assert_eq!(other, ProviderErrorCode::Other("quota-exceeded".into()));
        assert_eq!(other.to_string(), "auth/quota-exceeded");
    }

    #[test]
    fn test_display_never_shows_code() {
        let err = AuthError::provider(ProviderErrorCode::WeakPassword);
        assert_eq!(
            err.to_string(),
            "Passordet er for svakt. Velg et sterkere passord."
        );
        let other = AuthError::provider(ProviderErrorCode::Other("internal-error".into()));
        assert!(!other.to_string().contains("internal-error"));
    }
}
