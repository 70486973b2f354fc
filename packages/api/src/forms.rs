//! Form schemas for authentication and account settings.
//!
//! Each form holds the raw input and validates into [`FieldErrors`] keyed by
//! the field constants below, so widgets can show the message under the
//! matching input.

use store::validation::{char_len, is_valid_email};
use store::FieldErrors;

use crate::models::UserInfo;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_NEW_PASSWORD: &str = "new_password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirm_password";

const MIN_NAME: usize = 2;
const MAX_NAME: usize = 50;
const MIN_PASSWORD: usize = 6;

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email.trim()) {
        errors.push(FIELD_EMAIL, "Ugyldig e-postadresse");
    }
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    if char_len(name.trim()) < MIN_NAME {
        errors.push(FIELD_NAME, "Navn må være minst 2 tegn");
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.push(FIELD_PASSWORD, "Passord er påkrevd");
        }
        errors.into_result(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, &self.name);
        check_email(&mut errors, &self.email);
        if char_len(&self.password) < MIN_PASSWORD {
            errors.push(FIELD_PASSWORD, "Passord må være minst 6 tegn");
        }
        errors.into_result(())
    }
}

/// Profile edit. The email is shown read-only and never submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditProfileForm {
    pub name: String,
    email: String,
}

impl EditProfileForm {
    pub fn for_user(user: &UserInfo) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The trimmed name to store.
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = self.name.trim();
        check_name(&mut errors, name);
        if char_len(name) > MAX_NAME {
            errors.push(FIELD_NAME, "Navn kan ikke være lengre enn 50 tegn");
        }
        errors.into_result(name.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if char_len(&self.new_password) < MIN_PASSWORD {
            errors.push(FIELD_NEW_PASSWORD, "Nytt passord må være minst 6 tegn");
        }
        if self.new_password != self.confirm_password {
            errors.push(FIELD_CONFIRM_PASSWORD, "Passordene stemmer ikke overens");
        }
        errors.into_result(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rules() {
        let form = LoginForm {
            email: "nobody".into(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FIELD_EMAIL), Some("Ugyldig e-postadresse"));
        assert_eq!(errors.get(FIELD_PASSWORD), Some("Passord er påkrevd"));

        let ok = LoginForm {
            email: "nobody@x.com".into(),
            password: "wrong".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_signup_rules() {
        let form = SignupForm {
            name: "T".into(),
            email: "t@example.com".into(),
            password: "12345".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Navn må være minst 2 tegn"));
        assert_eq!(errors.get(FIELD_PASSWORD), Some("Passord må være minst 6 tegn"));
        assert!(errors.get(FIELD_EMAIL).is_none());
    }

    #[test]
    fn test_profile_name_bounds() {
        let user = UserInfo {
            id: "u".into(),
            email: "t@example.com".into(),
            name: Some("Test User".into()),
            avatar_url: None,
        };
        let mut form = EditProfileForm::for_user(&user);
        assert_eq!(form.email(), "t@example.com");
        assert_eq!(form.validate(), Ok("Test User".to_string()));

        form.name = "x".repeat(51);
        assert_eq!(
            form.validate().unwrap_err().get(FIELD_NAME),
            Some("Navn kan ikke være lengre enn 50 tegn")
        );
        form.name = " A ".into();
        assert_eq!(
            form.validate().unwrap_err().get(FIELD_NAME),
            Some("Navn må være minst 2 tegn")
        );
    }

    #[test]
    fn test_mismatch_is_reported_on_confirmation() {
        let mut form = ChangePasswordForm {
            new_password: "newsecret".into(),
            confirm_password: "newsecreT".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(FIELD_CONFIRM_PASSWORD),
            Some("Passordene stemmer ikke overens")
        );
        assert!(errors.get(FIELD_NEW_PASSWORD).is_none());

        form.clear();
        assert_eq!(form, ChangePasswordForm::default());
    }
}
