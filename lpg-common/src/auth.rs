//! Credential hashing and session tokens
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256:
//! - Salt: 16 random bytes, hex encoded
//! - Iterations: [`PBKDF2_ITERATIONS`]
//! - Stored as the 32-byte derived key, hex encoded (64 characters)
//!
//! Pure functions only; the database side lives in `db::users`.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{Error, Result};

pub const PBKDF2_ITERATIONS: u32 = 10_000;
pub const KEY_LENGTH: usize = 32;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Fresh random salt (32 hex characters)
pub fn generate_salt() -> String {
    hex::encode(random_bytes::<16>())
}

/// Fresh session token (64 hex characters)
pub fn generate_token() -> String {
    hex::encode(random_bytes::<32>())
}

/// Hash a password with its salt
///
/// # Examples
///
/// ```
/// use lpg_common::auth::hash_password;
///
/// let a = hash_password("hunter22", "00ff");
/// assert_eq!(a.len(), 64);
/// assert_eq!(a, hash_password("hunter22", "00ff"));
/// assert_ne!(a, hash_password("hunter22", "00fe"));
/// ```
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS, &mut key);
    hex::encode(key)
}

/// Compare a password against a stored hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt)
        .as_bytes()
        .ct_eq(expected_hash.as_bytes())
        .into()
}

/// Trim and lower-case an email, rejecting obviously malformed input
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(Error::InvalidInput(format!("Invalid email address: {}", email)));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
