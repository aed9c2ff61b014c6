//! Brute-force lockout guard
//!
//! Every access attempt for an identifier passes through
//! [`AccountDeniedService::check_and_record`]. Once the attempt count goes past
//! the configured maximum the identifier is blocked for a fixed window, and
//! every check during that window is denied.

use std::sync::Arc;

use ag_shared::config::LockoutConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::errors::AuthError;

use super::store::{AccessRecord, AccessRecordStore};

/// Read-only view of an identifier's lockout state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockStatus {
    /// Whether a block is currently in force
    pub is_locked: bool,
    /// Attempts recorded since the last reset
    pub attempts: u32,
    /// When the current block ends
    pub unlock_at: Option<DateTime<Utc>>,
    /// Remaining time in seconds until unlock
    pub remaining_seconds: Option<i64>,
}

/// Outcome of one check, decided while the store holds the identifier's lock
#[derive(Debug, Clone, Copy)]
enum Decision {
    Allowed { attempts: u32 },
    StillBlocked { until: DateTime<Utc> },
    Blocked { attempts: u32, until: DateTime<Utc> },
}

/// Service tracking failed access attempts and enforcing temporary lockout
pub struct AccountDeniedService<S>
where
    S: AccessRecordStore,
{
    /// Shared attempt ledger
    store: Arc<S>,
    /// Time source for block windows
    clock: Arc<dyn Clock>,
    /// Threshold and block duration
    config: LockoutConfig,
}

impl<S> AccountDeniedService<S>
where
    S: AccessRecordStore,
{
    /// Create a new lockout service
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: LockoutConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Create a new lockout service with default configuration
    /// (3 attempts, 5 minute block)
    pub fn with_defaults(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self::new(store, clock, LockoutConfig::default())
    }

    pub fn config(&self) -> &LockoutConfig {
        &self.config
    }

    /// Record an access attempt and decide whether it may proceed
    ///
    /// Call once per attempt, before checking credentials.
    ///
    /// # Arguments
    /// * `identifier` - Normalized email, email hash or another stable key
    ///
    /// # Returns
    /// * `Ok(())` - The attempt may proceed
    /// * `Err(AuthError::AccountDenied)` - A block is in force or was just imposed
    pub fn check_and_record(&self, identifier: &str) -> Result<(), AuthError> {
        let now = self.clock.now();
        let max_attempts = self.config.max_attempts;
        let block_duration = self.config.block_duration();
        let mut decision = Decision::Allowed { attempts: 0 };

        self.store.update(identifier, &mut |existing| {
            let mut record = existing.unwrap_or_default();

            if let Some(until) = record.blocked_until.filter(|until| *until > now) {
                decision = Decision::StillBlocked { until };
                return record;
            }

            // a block that has run out clears the slate
            if record.attempts >= max_attempts && record.blocked_until.is_some() {
                record = AccessRecord::default();
            }

            let attempts = record.attempts + 1;
            if attempts > max_attempts {
                let until = now + block_duration;
                decision = Decision::Blocked { attempts, until };
                return AccessRecord {
                    attempts,
                    blocked_until: Some(until),
                };
            }

            decision = Decision::Allowed { attempts };
            AccessRecord {
                attempts,
                blocked_until: record.blocked_until,
            }
        });

        match decision {
            Decision::Allowed { attempts } => {
                debug!(
                    identifier = identifier,
                    attempts = attempts,
                    max_attempts = max_attempts,
                    "Access attempt recorded"
                );
                Ok(())
            }
            Decision::StillBlocked { until } => {
                info!(
                    identifier = identifier,
                    blocked_until = %until,
                    "Access attempt denied while blocked"
                );
                Err(AuthError::AccountDenied)
            }
            Decision::Blocked { attempts, until } => {
                warn!(
                    identifier = identifier,
                    attempts = attempts,
                    duration_seconds = self.config.block_duration_seconds,
                    blocked_until = %until,
                    "Identifier blocked after too many access attempts"
                );
                Err(AuthError::AccountDenied)
            }
        }
    }

    /// Forget all attempts for an identifier
    ///
    /// Never called implicitly; callers decide whether a successful login
    /// resets the counter.
    ///
    /// # Returns
    /// * `true` if a record existed
    pub fn clear(&self, identifier: &str) -> bool {
        let removed = self.store.remove(identifier).is_some();
        if removed {
            info!(identifier = identifier, "Access attempt record cleared");
        }
        removed
    }

    /// Current lockout state for an identifier, without recording an attempt
    pub fn status(&self, identifier: &str) -> LockStatus {
        let now = self.clock.now();
        let record = self.store.get(identifier).unwrap_or_default();

        match record.blocked_until {
            Some(until) if record.is_blocked_at(now) => LockStatus {
                is_locked: true,
                attempts: record.attempts,
                unlock_at: Some(until),
                remaining_seconds: Some((until - now).num_seconds()),
            },
            _ => LockStatus {
                is_locked: false,
                attempts: record.attempts,
                unlock_at: None,
                remaining_seconds: None,
            },
        }
    }
}
