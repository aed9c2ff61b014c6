//! Core domain error bridging the specific error types

use thiserror::Error;

use super::types::{AuthError, PasswordViolation, ValidationError};

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Stable machine-readable code for mapping to user-facing text
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(e) => e.error_code(),
            DomainError::Validation(e) => e.error_code(),
        }
    }

    /// None of the errors in this layer describe a transient condition
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<PasswordViolation> for DomainError {
    fn from(violation: PasswordViolation) -> Self {
        DomainError::Validation(violation.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
