// Form input validation for the auth routes.
//
// Real password policy lives in the database's access logic; these checks
// only mirror what the original forms enforced before submitting.

use crate::error::ApiError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Validate an email address. Structural check only: a non-empty local
/// part and a dotted domain around a single `@`.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        tracing::warn!("rejected malformed email address");
        Err(ApiError::bad_request("Invalid email address"))
    }
}

/// Validate a password against the minimum length
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        tracing::warn!("rejected too-short password");
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
