//! # Password hashing and verification with Argon2id
//!
//! - [`hash_password`] generates a random salt via [`OsRng`] and returns the
//!   PHC-format string (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`) that the
//!   identity store keeps instead of the plaintext.
//! - [`verify_password`] parses a PHC-format hash and checks the plaintext
//!   against it. `Ok(false)` on mismatch, `Err` if the stored hash is malformed.
//!
//! The hasher is passed in so tests can run with cheap parameters; the shipped
//! store uses [`Argon2::default`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Hash a password. Returns a PHC-format string.
pub fn hash_password(argon2: &Argon2<'_>, password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(argon2: &Argon2<'_>, password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Argon2id with minimal cost, for tests.
pub fn light_hasher() -> Argon2<'static> {
    match Params::new(Params::MIN_M_COST, 1, 1, None) {
        Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        Err(_) => Argon2::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_and_verifies() {
        let argon2 = light_hasher();
        let hash = hash_password(&argon2, "secret1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret1"));
        assert!(verify_password(&argon2, "secret1", &hash).unwrap());
        assert!(!verify_password(&argon2, "secret2", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password(&light_hasher(), "x", "not-a-hash").is_err());
    }
}
