//! Password hashing and verification using Argon2.

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use password_hash::rand_core::OsRng;

use crate::error::{AuthError, Result};

/// Hashes a password using Argon2id.
///
/// Returns the hashed password as a PHC string that includes the salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHashError)?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// Returns true if the password matches, false otherwise.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Default minimum password length accepted by backends.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Default maximum password length accepted by backends.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Checks a password against length bounds, counted in characters.
pub fn validate_password(password: &str, min_length: usize, max_length: usize) -> Result<()> {
    let length = password.chars().count();
    if length < min_length {
        return Err(AuthError::PasswordTooShort);
    }
    if length > max_length {
        return Err(AuthError::PasswordTooLong);
    }
    Ok(())
}
