//! Domain-specific error types and error handling.

mod domain_error;
mod types;


// Re-export all error types
pub use domain_error::{DomainError, DomainResult};
pub use types::{AuthError, PasswordViolation, ValidationError};
