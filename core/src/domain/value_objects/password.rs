//! Salted, hashed credential with expiry and forced-rotation state.

use ag_shared::config::{
    PasswordPolicyConfig, DEFAULT_SPECIAL_CHARACTERS, MAX_HASH_INPUT_BYTES,
};
use ag_shared::validation::validators;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::clock::Clock;
use crate::errors::{AuthError, DomainError, DomainResult, PasswordViolation};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Hashed password
///
/// The plaintext is hashed with bcrypt as soon as it passes the policy and is
/// never stored. Serialization carries the hash and the rotation state only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password {
    hash: String,
    expires_at: Option<DateTime<Utc>>,
    must_change: bool,
}

impl Password {
    /// Validate and hash a plaintext using the default policy
    pub fn create(plaintext: &str) -> DomainResult<Self> {
        Self::create_with_policy(plaintext, &PasswordPolicyConfig::default())
    }

    /// Validate and hash a plaintext using the given policy
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidPassword` - the plaintext breaks a policy rule
    /// * `DomainError::Internal` - bcrypt refused to hash (e.g. unsupported cost)
    pub fn create_with_policy(plaintext: &str, policy: &PasswordPolicyConfig) -> DomainResult<Self> {
        Self::validate(plaintext, policy)?;

        let hash = bcrypt::hash(plaintext, policy.hash_cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })?;

        Ok(Self {
            hash,
            expires_at: None,
            must_change: false,
        })
    }

    /// Rebuild a password from its stored form
    pub fn from_hash(
        hash: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        must_change: bool,
    ) -> Self {
        Self {
            hash: hash.into(),
            expires_at,
            must_change,
        }
    }

    /// Check a plaintext against the policy without hashing it
    pub fn validate(plaintext: &str, policy: &PasswordPolicyConfig) -> Result<(), PasswordViolation> {
        if !validators::not_empty(plaintext) {
            return Err(PasswordViolation::Required);
        }

        if !validators::length_between(plaintext, policy.min_length, policy.max_length) {
            if plaintext.chars().count() < policy.min_length {
                return Err(PasswordViolation::TooShort { min: policy.min_length });
            }
            return Err(PasswordViolation::TooLong { max: policy.max_length });
        }
        // multi-byte input can fit the character bound and still be truncated by bcrypt
        if plaintext.len() > MAX_HASH_INPUT_BYTES {
            return Err(PasswordViolation::TooLong { max: policy.max_length });
        }

        if policy.require_uppercase && !plaintext.chars().any(char::is_uppercase) {
            return Err(PasswordViolation::MissingUppercase);
        }
        if policy.require_digit && !plaintext.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordViolation::MissingDigit);
        }
        if policy.require_special && !plaintext.chars().any(|c| policy.is_special(c)) {
            return Err(PasswordViolation::MissingSpecialCharacter);
        }

        Ok(())
    }

    /// Generate a random plaintext using the default policy
    pub fn generate() -> String {
        Self::generate_with_policy(&PasswordPolicyConfig::default())
    }

    /// Generate a random plaintext containing lower-case, upper-case, digit
    /// and special characters, `policy.generated_length` characters long
    pub fn generate_with_policy(policy: &PasswordPolicyConfig) -> String {
        let specials: Vec<char> = if policy.special_characters.is_empty() {
            DEFAULT_SPECIAL_CHARACTERS.chars().collect()
        } else {
            policy.special_characters.chars().collect()
        };
        let classes: [Vec<char>; 4] = [
            LOWERCASE.iter().map(|&b| b as char).collect(),
            UPPERCASE.iter().map(|&b| b as char).collect(),
            DIGITS.iter().map(|&b| b as char).collect(),
            specials,
        ];
        let all: Vec<char> = classes.iter().flatten().copied().collect();

        let mut rng = rand::thread_rng();
        let length = policy.generated_length.max(classes.len());

        // one of each class first, the rest drawn from the union
        let mut chars: Vec<char> = classes
            .iter()
            .map(|class| class[rng.gen_range(0..class.len())])
            .collect();
        while chars.len() < length {
            chars.push(all[rng.gen_range(0..all.len())]);
        }
        chars.shuffle(&mut rng);

        chars.into_iter().collect()
    }

    /// Check a plaintext against a bcrypt hash
    ///
    /// A malformed hash never matches.
    pub fn matches(hash: &str, plaintext: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or_else(|e| {
            debug!(error = %e, "Password hash could not be verified");
            false
        })
    }

    /// Check a plaintext against this password's hash
    pub fn matches_plaintext(&self, plaintext: &str) -> bool {
        Self::matches(&self.hash, plaintext)
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn must_change(&self) -> bool {
        self.must_change
    }

    /// Expire the password as of now
    pub fn expire(&mut self, clock: &dyn Clock) {
        self.expires_at = Some(clock.now());
    }

    /// Whether the expiry has been reached
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        matches!(self.expires_at, Some(expires_at) if expires_at <= clock.now())
    }

    /// Force a rotation before the next use
    pub fn mark_as_must_change(&mut self) {
        self.must_change = true;
    }

    /// Gate deciding whether the credential may be used at all
    ///
    /// Independent of whether a plaintext matches the hash.
    pub fn verify(&self) -> Result<(), AuthError> {
        if self.must_change {
            return Err(AuthError::PasswordMustChange);
        }
        Ok(())
    }
}

impl std::fmt::Display for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hash)
    }
}
