//! Credential, verification code and lockout configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Characters accepted as "special" by the password composition rules
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "!@#$%^&*(){}[];";

/// Lowest bcrypt cost accepted by the hasher
pub const MIN_HASH_COST: u32 = 4;

/// Highest bcrypt cost accepted by the hasher
pub const MAX_HASH_COST: u32 = 31;

/// bcrypt ignores input past this many bytes
pub const MAX_HASH_INPUT_BYTES: usize = 72;

/// Password acceptance, generation and hashing policy
///
/// A single canonical policy governs both `Password::create` and
/// `Password::generate`: plaintexts between `min_length` and `max_length`
/// characters, and at most `MAX_HASH_INPUT_BYTES` bytes, are accepted, and
/// the composition flags are off unless configured. Generated passwords
/// always contain every character class so they satisfy the policy whichever
/// flags are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasswordPolicyConfig {
    /// Minimum accepted length in characters
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Maximum accepted length in characters
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Require at least one upper-case letter
    #[serde(default)]
    pub require_uppercase: bool,

    /// Require at least one digit
    #[serde(default)]
    pub require_digit: bool,

    /// Require at least one character from `special_characters`
    #[serde(default)]
    pub require_special: bool,

    /// Set of characters considered special
    #[serde(default = "default_special_characters")]
    pub special_characters: String,

    /// Length of passwords produced by the generator
    #[serde(default = "default_generated_length")]
    pub generated_length: usize,

    /// bcrypt work factor
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            require_uppercase: false,
            require_digit: false,
            require_special: false,
            special_characters: default_special_characters(),
            generated_length: default_generated_length(),
            hash_cost: default_hash_cost(),
        }
    }
}

impl PasswordPolicyConfig {
    /// Load the policy from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_length: env_or("PASSWORD_MIN_LENGTH", defaults.min_length),
            max_length: env_or("PASSWORD_MAX_LENGTH", defaults.max_length),
            require_uppercase: env_or("PASSWORD_REQUIRE_UPPERCASE", defaults.require_uppercase),
            require_digit: env_or("PASSWORD_REQUIRE_DIGIT", defaults.require_digit),
            require_special: env_or("PASSWORD_REQUIRE_SPECIAL", defaults.require_special),
            generated_length: env_or("PASSWORD_GENERATED_LENGTH", defaults.generated_length),
            hash_cost: env_or("PASSWORD_HASH_COST", defaults.hash_cost),
            ..defaults
        }
    }

    /// Enable upper-case, digit and special character requirements
    pub fn with_composition_rules(mut self) -> Self {
        self.require_uppercase = true;
        self.require_digit = true;
        self.require_special = true;
        self
    }

    /// Override the bcrypt work factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Check whether a character belongs to the special set
    pub fn is_special(&self, c: char) -> bool {
        self.special_characters.contains(c)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(ConfigError::invalid(
                "password.min_length",
                format!("must be between 1 and max_length ({})", self.max_length),
            ));
        }
        if !(self.min_length..=self.max_length).contains(&self.generated_length) {
            return Err(ConfigError::invalid(
                "password.generated_length",
                format!("must be between {} and {}", self.min_length, self.max_length),
            ));
        }
        // one slot per character class
        if self.generated_length < 4 {
            return Err(ConfigError::invalid("password.generated_length", "must be at least 4"));
        }
        if self.special_characters.is_empty() {
            return Err(ConfigError::invalid("password.special_characters", "must not be empty"));
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hash_cost) {
            return Err(ConfigError::invalid(
                "password.hash_cost",
                format!("must be between {} and {}", MIN_HASH_COST, MAX_HASH_COST),
            ));
        }
        Ok(())
    }
}

/// Verification code lifetime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationCodeConfig {
    /// Seconds between creation and expiry (default: 300 = 5 minutes)
    #[serde(default = "default_code_ttl")]
    pub ttl_seconds: u32,
}

impl Default for VerificationCodeConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_code_ttl(),
        }
    }
}

impl VerificationCodeConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: env_or("VERIFICATION_CODE_TTL_SECONDS", default_code_ttl()),
        }
    }

    /// Code lifetime as a chrono duration
    pub fn ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.ttl_seconds))
    }
}

/// Brute-force lockout configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Attempts admitted before a block is imposed (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds a block lasts once imposed (default: 300 = 5 minutes)
    #[serde(default = "default_block_seconds")]
    pub block_duration_seconds: u32,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            block_duration_seconds: default_block_seconds(),
        }
    }
}

impl LockoutConfig {
    pub fn from_env() -> Self {
        Self {
            max_attempts: env_or("LOCKOUT_MAX_ATTEMPTS", default_max_attempts()),
            block_duration_seconds: env_or("LOCKOUT_BLOCK_SECONDS", default_block_seconds()),
        }
    }

    /// Block window as a chrono duration
    pub fn block_duration(&self) -> Duration {
        Duration::seconds(i64::from(self.block_duration_seconds))
    }
}

/// Configuration validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid configuration for {field}: {reason}")]
pub struct ConfigError {
    pub field: String,
    pub reason: String,
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn validate_all(
    password: &PasswordPolicyConfig,
    verification: &VerificationCodeConfig,
    lockout: &LockoutConfig,
) -> Result<(), ConfigError> {
    password.validate()?;
    if verification.ttl_seconds == 0 {
        return Err(ConfigError::invalid("verification.ttl_seconds", "must be positive"));
    }
    if lockout.max_attempts == 0 {
        return Err(ConfigError::invalid("lockout.max_attempts", "must be positive"));
    }
    if lockout.block_duration_seconds == 0 {
        return Err(ConfigError::invalid("lockout.block_duration_seconds", "must be positive"));
    }
    Ok(())
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn default_min_length() -> usize {
    8
}

fn default_max_length() -> usize {
    48
}

fn default_special_characters() -> String {
    DEFAULT_SPECIAL_CHARACTERS.to_string()
}

fn default_generated_length() -> usize {
    16
}

fn default_hash_cost() -> u32 {
    12
}

fn default_code_ttl() -> u32 {
    300
}

fn default_max_attempts() -> u32 {
    3
}

fn default_block_seconds() -> u32 {
    300
}
