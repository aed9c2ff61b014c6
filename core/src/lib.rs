//! # Account Guard Core
//!
//! Account security primitives: the clock abstraction, the `VerificationCode`,
//! `Password` and `Email` value objects, the brute-force lockout service and
//! the error types they report.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
