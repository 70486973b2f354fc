//! Field-level validation errors shared by every form.

use std::fmt;

/// Ordered list of `(field, message)` pairs. Only the first message per field
/// is kept, matching what a form can show under one input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// Drops the message of `field`, once the user has fixed it.
    pub fn clear(&mut self, field: &str) {
        self.errors.retain(|(name, _)| *name != field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(value)` when no errors were collected.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in &self.errors {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Loose address check: one `@`, non-empty local part, a dotted domain and no
/// whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Length in characters, so "Åse" counts as three.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.push("name", "first");
        errors.push("name", "second");
        errors.push("email", "bad");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.to_string(), "first bad");
    }

    #[test]
    fn test_clear_only_drops_that_field() {
        let mut errors = FieldErrors::new();
        errors.push("location", "missing");
        errors.push("photo", "missing");
        errors.clear("location");
        assert_eq!(errors.get("location"), None);
        assert_eq!(errors.get("photo"), Some("missing"));
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("t@example.com"));
        assert!(is_valid_email("nobody@x.com"));
        assert!(!is_valid_email("nobody"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.no"));
        assert!(!is_valid_email("a@@c.no"));
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Åse"), 3);
    }
}
