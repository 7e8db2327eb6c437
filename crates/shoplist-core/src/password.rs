//! Salted password hashing.
//!
//! Each account gets its own random [`Salt`], stored next to the hash. The
//! hash is bcrypt over the password with that salt, so the same password
//! produces a different hash for every user, while the same
//! `(password, salt)` pair always produces the same hash. Verification
//! recomputes the hash with the stored salt and compares in constant time.

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, Version, hash_with_salt};
use constant_time_eq::constant_time_eq;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::errors::AppError;

/// Length of a password salt in bytes (bcrypt's native salt size).
pub const SALT_LEN: usize = 16;

/// bcrypt only reads this many bytes of input. Longer passwords are
/// rejected instead of silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub type Salt = [u8; SALT_LEN];

/// Generates a fresh salt from the operating system's CSPRNG.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Hashes `password` under `salt`.
///
/// A password longer than [`MAX_PASSWORD_BYTES`] bytes is
/// `422 Unprocessable Entity`.
pub fn hash_password(password: &str, salt: &Salt) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::unprocessable(anyhow!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    hash_with_salt(password, DEFAULT_COST, *salt)
        .map(|parts| parts.format_for_version(Version::TwoB))
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored hash using the stored salt.
///
/// Fails only when the stored salt is malformed or hashing itself fails; a
/// wrong password is `Ok(false)`. So is an over-long one, since no stored
/// hash can have been made from it.
pub fn verify_password(password: &str, salt: &[u8], stored_hash: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    let salt: Salt = salt
        .try_into()
        .map_err(|_| AppError::internal_error(format!("Stored salt must be {SALT_LEN} bytes")))?;

    let candidate = hash_password(password, &salt)?;
    Ok(constant_time_eq(candidate.as_bytes(), stored_hash.as_bytes()))
}
