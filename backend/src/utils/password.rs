//! Password hashing and verification.
//!
//! bcrypt generates a fresh random salt for every hash and embeds it, together
//! with the cost, in the returned string. Both operations are deliberately slow
//! and run on the blocking thread pool.
//!
//! bcrypt only reads the first 72 bytes of its NUL-terminated input, so at
//! most 71 password bytes count. Longer passwords are rejected rather than
//! silently truncated.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{non_truncating_hash, non_truncating_verify};

/// Longest password, in bytes, that bcrypt reads in full
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Hash a password before storing it in the database
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - bcrypt work factor
///
/// # Errors
/// - `ServiceError::Validation` if the password is longer than `MAX_PASSWORD_BYTES`
/// - `ServiceError::InternalError` if hashing fails
pub async fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServiceError::validation(format!(
            "password: Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    let password = password.to_owned();
    tokio::task::spawn_blocking(move || non_truncating_hash(password, cost))
        .await
        .map_err(|e| ServiceError::internal_error(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Verify a password against the stored hash
///
/// Returns `true` if the password matches. A password too long to have been
/// hashed never matches. A stored value that is not a valid bcrypt hash is an
/// internal error, not a mismatch.
pub async fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }

    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || non_truncating_verify(password, &password_hash))
        .await
        .map_err(|e| {
            ServiceError::internal_error(format!("Password verification task failed: {}", e))
        })?
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
}
