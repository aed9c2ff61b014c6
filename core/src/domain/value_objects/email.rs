//! Normalized email address owning the code that confirms it.

use ag_shared::validation::{normalize_email, validators};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::clock::Clock;
use crate::domain::value_objects::VerificationCode;
use crate::errors::{AuthError, ValidationError};

/// Email address value object
///
/// The address is trimmed and lower-cased before validation. `hash` is the
/// SHA-256 of the normalized address in hex, suitable as a lookup key or in
/// logs where the address itself must not appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    address: String,
    hash: String,
    verification_code: VerificationCode,
}

impl Email {
    /// Validate and normalize a raw address, minting a fresh verification code
    pub fn create(raw: &str, clock: &dyn Clock) -> Result<Self, ValidationError> {
        if !validators::not_empty(raw) {
            return Err(ValidationError::InvalidEmail);
        }

        let address = normalize_email(raw);
        if !validators::is_valid_email(&address) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            hash: hash_address(&address),
            address,
            verification_code: VerificationCode::create(clock),
        })
    }

    /// Same contract as [`Email::create`]
    pub fn from_string(raw: &str, clock: &dyn Clock) -> Result<Self, ValidationError> {
        Self::create(raw, clock)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn local_part(&self) -> &str {
        self.address
            .split_once('@')
            .map_or(self.address.as_str(), |(local, _)| local)
    }

    pub fn domain(&self) -> &str {
        self.address
            .split_once('@')
            .map_or("", |(_, domain)| domain)
    }

    pub fn verification_code(&self) -> &VerificationCode {
        &self.verification_code
    }

    /// Whether ownership of the address has been confirmed
    pub fn is_verified(&self) -> bool {
        self.verification_code.is_active()
    }

    /// Confirm ownership of the address with the code sent to it
    pub fn verify(&mut self, code: &str, clock: &dyn Clock) -> Result<(), AuthError> {
        self.verification_code.verify(code, clock)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}

/// SHA-256 of a normalized address, hex encoded
pub fn hash_address(address: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.as_bytes());
    hex::encode(hasher.finalize())
}
