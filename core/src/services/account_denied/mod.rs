//! Account denied service module
//!
//! Brute-force protection for login and verification flows:
//! - Per-identifier attempt counting
//! - Temporary blocks once the threshold is crossed
//! - Pluggable, thread-safe record storage

mod service;
mod store;

#[cfg(test)]
mod tests;

pub use service::{AccountDeniedService, LockStatus};
pub use store::{AccessRecord, AccessRecordStore, InMemoryAccessRecordStore};
