//! Shared utilities and common types for Account Guard
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (password policy, verification codes, lockout, logging)
//! - Utility functions (email normalization and validation, tracing setup)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ConfigError, Environment, LockoutConfig, LogFormat, LoggingConfig, PasswordPolicyConfig,
    SecurityConfig, VerificationCodeConfig,
};
pub use utils::{init_tracing, validation};
