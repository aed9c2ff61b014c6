//! Value objects representing account security concepts.

pub mod email;
pub mod password;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use email::Email;
pub use password::Password;
pub use verification_code::{VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
