//! Configuration module with security-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `security` - Password policy, verification code lifetime and lockout

pub mod environment;
pub mod security;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use security::{
    ConfigError, LockoutConfig, PasswordPolicyConfig, VerificationCodeConfig,
    DEFAULT_SPECIAL_CHARACTERS, MAX_HASH_INPUT_BYTES,
};

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Password acceptance and hashing policy
    #[serde(default)]
    pub password: PasswordPolicyConfig,

    /// Verification code lifetime
    #[serde(default)]
    pub verification: VerificationCodeConfig,

    /// Brute-force lockout
    #[serde(default)]
    pub lockout: LockoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            password: PasswordPolicyConfig::default(),
            verification: VerificationCodeConfig::default(),
            lockout: LockoutConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl SecurityConfig {
    /// Create configuration for development environment
    ///
    /// Uses a lower bcrypt cost so local logins stay fast.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            password: PasswordPolicyConfig::default().with_hash_cost(10),
            verification: VerificationCodeConfig::default(),
            lockout: LockoutConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            password: PasswordPolicyConfig::default(),
            verification: VerificationCodeConfig::default(),
            lockout: LockoutConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            password: PasswordPolicyConfig::from_env(),
            verification: VerificationCodeConfig::from_env(),
            lockout: LockoutConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject inconsistent values before they reach the services
    pub fn validate(&self) -> Result<(), ConfigError> {
        security::validate_all(&self.password, &self.verification, &self.lockout)
    }
}
