//! Authentication helpers.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Credential rules for new accounts

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use thiserror::Error;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 80;

/// Reasons new credentials are refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Blank or overlong username.
    #[error("username must be 1-{MAX_USERNAME_LEN} characters without surrounding whitespace")]
    InvalidUsername,

    /// Email without an `@`.
    #[error("invalid email address")]
    InvalidEmail,

    /// Password shorter than [`MIN_PASSWORD_LEN`].
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Checks username, email and password for a new account.
///
/// # Errors
///
/// Returns the first rule the input breaks.
pub fn validate_credentials(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), CredentialError> {
    let trimmed = username.trim();
    if trimmed.is_empty() || trimmed != username || username.chars().count() > MAX_USERNAME_LEN {
        return Err(CredentialError::InvalidUsername);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(CredentialError::InvalidEmail),
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}
