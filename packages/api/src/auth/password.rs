//! # Password hashing: Argon2id
//!
//! Consultant passwords are stored in `users.password_hash` as PHC strings
//! (`$argon2id$v=19$m=19456,t=2,p=1$...`) produced with the `argon2` crate's
//! default parameters and a fresh [`OsRng`] salt.
//!
//! - [`hash_password`] is used when a password is changed.
//! - [`verify_password`] backs sign-in. A mismatch is `Ok(false)`; only a
//!   malformed stored hash is an error.
//! - [`check_new_password`] is the single server-side rule for new passwords.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password into a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC-format hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| ApiError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Reject passwords the backend will not store.
pub fn check_new_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
