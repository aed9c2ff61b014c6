//! One-time verification code proving control of a contact channel.

use ag_shared::config::VerificationCodeConfig;
use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::clock::Clock;
use crate::errors::AuthError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Time-boxed code that can be verified exactly once
///
/// A fresh code carries an expiry and no verification timestamp. A successful
/// [`verify`](Self::verify) sets the verification timestamp and clears the
/// expiry; from then on every verification attempt fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    code: String,
    expires_at: Option<DateTime<Utc>>,
    verified_at: Option<DateTime<Utc>>,
}

/// Why a supplied code was refused. Only ever logged, never returned.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    Blank,
    WrongLength,
    Mismatch,
    AlreadyVerified,
    Expired,
}

impl Rejection {
    fn as_str(self) -> &'static str {
        match self {
            Rejection::Blank => "blank",
            Rejection::WrongLength => "wrong_length",
            Rejection::Mismatch => "mismatch",
            Rejection::AlreadyVerified => "already_verified",
            Rejection::Expired => "expired",
        }
    }
}

impl VerificationCode {
    /// Creates a new code that expires five minutes after `clock.now()`
    pub fn create(clock: &dyn Clock) -> Self {
        Self::with_lifetime(clock, Duration::minutes(DEFAULT_EXPIRATION_MINUTES))
    }

    /// Creates a new code using the configured lifetime
    pub fn create_with_config(clock: &dyn Clock, config: &VerificationCodeConfig) -> Self {
        Self::with_lifetime(clock, config.ttl())
    }

    fn with_lifetime(clock: &dyn Clock, lifetime: Duration) -> Self {
        Self {
            code: Self::generate_code(),
            expires_at: Some(clock.now() + lifetime),
            verified_at: None,
        }
    }

    /// Generates a random upper-case alphanumeric code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    /// Whether the code has already been verified
    pub fn is_active(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Whether the expiry has been reached
    ///
    /// A verified code has no expiry and is never reported as expired.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        matches!(self.expires_at, Some(expires_at) if clock.now() >= expires_at)
    }

    /// Time left before the code expires, zero once expired or verified
    pub fn time_until_expiration(&self, clock: &dyn Clock) -> Duration {
        let now = clock.now();
        match self.expires_at {
            Some(expires_at) if expires_at > now => expires_at - now,
            _ => Duration::zero(),
        }
    }

    /// Verifies the supplied code and marks this code as used
    ///
    /// The comparison ignores case. Every failure yields
    /// [`AuthError::InvalidVerificationCode`]; the concrete reason is only
    /// logged.
    ///
    /// # Arguments
    ///
    /// * `supplied` - The code entered by the user
    /// * `clock` - Source of the current time, read at call time
    pub fn verify(&mut self, supplied: &str, clock: &dyn Clock) -> Result<(), AuthError> {
        let now = clock.now();

        if let Err(rejection) = self.check(supplied, now) {
            debug!(reason = rejection.as_str(), "Verification code rejected");
            return Err(AuthError::InvalidVerificationCode);
        }

        self.verified_at = Some(now);
        self.expires_at = None;
        debug!("Verification code accepted");
        Ok(())
    }

    fn check(&self, supplied: &str, now: DateTime<Utc>) -> Result<(), Rejection> {
        if supplied.trim().is_empty() {
            return Err(Rejection::Blank);
        }

        if supplied.chars().count() != CODE_LENGTH {
            return Err(Rejection::WrongLength);
        }

        let supplied = supplied.to_ascii_uppercase();
        if !constant_time_eq(supplied.as_bytes(), self.code.as_bytes()) {
            return Err(Rejection::Mismatch);
        }

        if self.is_active() {
            return Err(Rejection::AlreadyVerified);
        }

        if matches!(self.expires_at, Some(expires_at) if now >= expires_at) {
            return Err(Rejection::Expired);
        }

        Ok(())
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}
