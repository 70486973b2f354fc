//! # User records
//!
//! Two representations of a Relivery user:
//!
//! ## [`ProviderUser`]
//!
//! The identity provider's own record (`uid`, `email`, `display_name`,
//! `photo_url`). The email is optional because some providers allow accounts
//! without one.
//!
//! ## [`UserInfo`]
//!
//! What the application holds for the signed-in user. Mapped from a
//! [`ProviderUser`] with a missing email becoming an empty string. The helpers
//! [`UserInfo::display_name`], [`UserInfo::first_name`] and
//! [`UserInfo::initials`] drive the greeting, header and avatar fallback.

use serde::{Deserialize, Serialize};

/// User record as the identity provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// The signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&ProviderUser> for UserInfo {
    fn from(user: &ProviderUser) -> Self {
        Self {
            id: user.uid.clone(),
            email: user.email.clone().unwrap_or_default(),
            name: user.display_name.clone().filter(|name| !name.is_empty()),
            avatar_url: user.photo_url.clone().filter(|url| !url.is_empty()),
        }
    }
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }

    /// First word of the name, `None` without a name.
    pub fn first_name(&self) -> Option<&str> {
        self.name.as_deref()?.split_whitespace().next()
    }

    /// Avatar fallback: first letter of each word, upper-cased. `"U"` without
    /// a name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(display_name: Option<&str>, email: Option<&str>) -> ProviderUser {
        ProviderUser {
            uid: "uid-1".into(),
            email: email.map(Into::into),
            display_name: display_name.map(Into::into),
            photo_url: None,
        }
    }

    #[test]
    fn test_mapping_fills_missing_email() {
        let info = UserInfo::from(&provider(Some("Test User"), None));
        assert_eq!(info.id, "uid-1");
        assert_eq!(info.email, "");
        assert_eq!(info.display_name(), "Test User");
    }

    #[test]
    fn test_initials_and_first_name() {
        let info = UserInfo::from(&provider(Some("Test User"), Some("t@example.com")));
        assert_eq!(info.initials(), "TU");
        assert_eq!(info.first_name(), Some("Test"));

        let anonymous = UserInfo::from(&provider(None, Some("t@example.com")));
        assert_eq!(anonymous.initials(), "U");
        assert_eq!(anonymous.first_name(), None);
        assert_eq!(anonymous.display_name(), "t@example.com");

        let lower = UserInfo::from(&provider(Some("åse by"), None));
        assert_eq!(lower.initials(), "ÅB");
    }
}
