//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld: one '@', no whitespace, no empty domain labels
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").unwrap()
});

/// Normalize an email address by trimming surrounding whitespace and lower-casing
///
/// Normalization is idempotent: `normalize_email(&normalize_email(x)) == normalize_email(x)`.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Common validation functions
pub mod validators {
    use super::EMAIL_REGEX;

    /// Check if a string is not empty or whitespace-only
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length, counted in characters, is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if an email address has a `local@domain.tld` shape
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }
}
