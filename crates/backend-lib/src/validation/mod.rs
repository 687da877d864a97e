// ============================
// chatter-backend/src/validation/mod.rs
// ============================
//! Request validation.
//!
//! Lengths are counted in characters, not bytes.

use chatter_common::{RegisterRequest, UpdateProfileRequest};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Possible validation errors. The message is returned to the client as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidName(String),

    #[error("{0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("at least one of name, email or password must be provided")]
    EmptyUpdate,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a display name
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName("name is required".to_string()));
    }

    let len = name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        return Err(ValidationError::InvalidName(format!(
            "name must be between {MIN_NAME_LENGTH} and {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail("email is required".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "email cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail("invalid email format".to_string()));
    }

    Ok(email)
}

/// Validate a plaintext password
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "password is required".to_string(),
        ));
    }

    let len = password.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Err(ValidationError::InvalidPassword(format!(
            "password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}

/// Validate a registration body, reporting the first failing field
pub fn validate_registration(req: &RegisterRequest) -> ValidationResult<()> {
    validate_name(&req.name)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    Ok(())
}

/// Validate a profile update. Only supplied fields are checked.
pub fn validate_profile_update(req: &UpdateProfileRequest) -> ValidationResult<()> {
    if req.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    if let Some(name) = &req.name {
        validate_name(name)?;
    }
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(password) = &req.password {
        validate_password(password)?;
    }
    Ok(())
}
