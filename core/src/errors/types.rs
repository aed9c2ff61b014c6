//! Domain-specific error types for account security operations
//!
//! Message text here is diagnostic; callers map the variants to user-facing
//! messages in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
///
/// `InvalidVerificationCode` deliberately covers every verification failure
/// (bad format, wrong code, already used, expired) so that responses do not
/// reveal which one occurred.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Account temporarily denied, try again later")]
    AccountDenied,

    #[error("Password must be changed before use.")]
    PasswordMustChange,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("{0}")]
    InvalidPassword(PasswordViolation),
}

/// The password policy rule a plaintext failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    #[error("Password is required")]
    Required,

    #[error("Password should have at least {min} characters")]
    TooShort { min: usize },

    #[error("Password should have less than {max} characters")]
    TooLong { max: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecialCharacter,
}

impl From<PasswordViolation> for ValidationError {
    fn from(violation: PasswordViolation) -> Self {
        ValidationError::InvalidPassword(violation)
    }
}

impl AuthError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            AuthError::AccountDenied => "ACCOUNT_DENIED",
            AuthError::PasswordMustChange => "PASSWORD_MUST_CHANGE",
        }
    }
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidPassword(_) => "INVALID_PASSWORD",
        }
    }
}
