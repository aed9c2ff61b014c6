//! Unit tests for password custody

use ag_shared::PasswordPolicyConfig;
use chrono::Duration;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::clock::{Clock, ManualClock};
use crate::domain::value_objects::Password;
use crate::errors::{AuthError, DomainError, PasswordViolation, ValidationError};

fn fast_policy() -> PasswordPolicyConfig {
    PasswordPolicyConfig::default().with_hash_cost(4)
}

fn random_lowercase(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .map(|b| (b as char).to_ascii_lowercase())
        .take(len)
        .collect()
}

fn violation(result: Result<Password, DomainError>) -> PasswordViolation {
    match result {
        Err(DomainError::Validation(ValidationError::InvalidPassword(v))) => v,
        other => panic!("expected a password violation, got {:?}", other),
    }
}

#[test]
fn test_blank_password_is_required() {
    for plaintext in ["", "  ", "    "] {
        assert_eq!(
            violation(Password::create(plaintext)),
            PasswordViolation::Required
        );
    }
}

#[test]
fn test_short_password_rejected() {
    for len in 1..8 {
        let result = Password::create_with_policy(&random_lowercase(len), &fast_policy());
        let v = violation(result);
        assert_eq!(v, PasswordViolation::TooShort { min: 8 });
        assert_eq!(v.to_string(), "Password should have at least 8 characters");
    }
}

#[test]
fn test_long_password_rejected() {
    for len in [49, 64, 128, 254] {
        let result = Password::create_with_policy(&random_lowercase(len), &fast_policy());
        let v = violation(result);
        assert_eq!(v, PasswordViolation::TooLong { max: 48 });
        assert_eq!(v.to_string(), "Password should have less than 48 characters");
    }
}

#[test]
fn test_bounds_are_inclusive() {
    assert!(Password::create_with_policy(&random_lowercase(8), &fast_policy()).is_ok());
    assert!(Password::create_with_policy(&random_lowercase(48), &fast_policy()).is_ok());
}

#[test]
fn test_length_counts_characters_not_bytes() {
    // 8 characters, 16 bytes
    assert!(Password::create_with_policy("ßßßßßßßß", &fast_policy()).is_ok());
}

#[test]
fn test_multibyte_password_past_hash_input_limit_rejected() {
    // 40 characters, 76 bytes: the differing tail would be ignored by bcrypt
    let prefix = "é".repeat(36);
    let first = format!("{}AAAA", prefix);
    let second = format!("{}BBBB", prefix);
    assert_eq!(first.chars().count(), 40);

    for plaintext in [&first, &second] {
        assert_eq!(
            violation(Password::create_with_policy(plaintext, &fast_policy())),
            PasswordViolation::TooLong { max: 48 }
        );
    }
}

#[test]
fn test_multibyte_password_at_hash_input_limit_is_distinct() {
    // 36 characters, exactly 72 bytes
    let first = format!("{}AA", "é".repeat(35));
    let second = format!("{}BB", "é".repeat(35));
    assert_eq!(first.len(), 72);

    let password = Password::create_with_policy(&first, &fast_policy()).unwrap();
    assert!(Password::matches(password.hash(), &first));
    assert!(!Password::matches(password.hash(), &second));
}

#[test]
fn test_default_policy_has_no_composition_rule() {
    let plaintext = random_lowercase(10);
    let password = Password::create(&plaintext).unwrap();

    assert!(Password::matches(password.hash(), &plaintext));
}

#[test]
fn test_composition_rules_when_enabled() {
    let policy = fast_policy().with_composition_rules();

    assert_eq!(
        violation(Password::create_with_policy("lowercase1!", &policy)),
        PasswordViolation::MissingUppercase
    );
    assert_eq!(
        violation(Password::create_with_policy("Uppercase!!", &policy)),
        PasswordViolation::MissingDigit
    );
    assert_eq!(
        violation(Password::create_with_policy("Uppercase11", &policy)),
        PasswordViolation::MissingSpecialCharacter
    );
    assert!(Password::create_with_policy("Uppercase1!", &policy).is_ok());
}

#[test]
fn test_hash_and_match() {
    let plaintext = Password::generate();
    let password = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();

    assert_ne!(password.hash(), plaintext);
    assert!(Password::matches(password.hash(), &plaintext));
    assert!(!Password::matches(password.hash(), "wrongPassword"));
    assert!(password.matches_plaintext(&plaintext));
}

#[test]
fn test_hash_is_salted() {
    let plaintext = random_lowercase(12);
    let first = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();
    let second = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();

    assert_ne!(first.hash(), second.hash());
    assert!(Password::matches(first.hash(), &plaintext));
    assert!(Password::matches(second.hash(), &plaintext));
}

#[test]
fn test_malformed_hash_never_matches() {
    assert!(!Password::matches("not-a-bcrypt-hash", "anything"));
    assert!(!Password::matches("", ""));
}

#[test]
fn test_generated_password_is_strong() {
    let strict = PasswordPolicyConfig {
        min_length: 16,
        ..fast_policy().with_composition_rules()
    };

    for _ in 0..50 {
        let plaintext = Password::generate();
        assert_eq!(plaintext.chars().count(), 16);
        assert!(plaintext.chars().any(|c| c.is_ascii_lowercase()));
        assert!(Password::validate(&plaintext, &strict).is_ok(), "{}", plaintext);
    }
}

#[test]
fn test_generated_length_follows_policy() {
    let policy = PasswordPolicyConfig {
        generated_length: 32,
        ..fast_policy()
    };
    assert_eq!(Password::generate_with_policy(&policy).chars().count(), 32);
}

#[test]
fn test_display_and_serialization_expose_hash_only() {
    let plaintext = random_lowercase(12);
    let password = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();

    assert_eq!(password.to_string(), password.hash());

    let json = serde_json::to_string(&password).unwrap();
    assert!(!json.contains(&plaintext));
    let restored: Password = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, password);
}

#[test]
fn test_expire() {
    let clock = ManualClock::starting_now();
    let mut password = Password::create_with_policy(&random_lowercase(10), &fast_policy()).unwrap();

    assert!(password.expires_at().is_none());
    assert!(!password.is_expired(&clock));

    password.expire(&clock);

    assert_eq!(password.expires_at(), Some(clock.now()));
    assert!(password.is_expired(&clock));

    clock.advance(Duration::days(1));
    assert!(password.is_expired(&clock));
}

#[test]
fn test_future_expiry_is_not_expired() {
    let clock = ManualClock::starting_now();
    let password = Password::from_hash("$2b$04$x", Some(clock.now() + Duration::hours(1)), false);

    assert!(!password.is_expired(&clock));
}

#[test]
fn test_must_change_blocks_use() {
    let plaintext = random_lowercase(10);
    let mut password = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();

    assert!(password.verify().is_ok());

    password.mark_as_must_change();

    assert!(password.must_change());
    let err = password.verify().unwrap_err();
    assert_eq!(err, AuthError::PasswordMustChange);
    assert_eq!(err.to_string(), "Password must be changed before use.");
    // hash matching still works mechanically
    assert!(password.matches_plaintext(&plaintext));
}

#[test]
fn test_from_hash_preserves_state() {
    let plaintext = random_lowercase(10);
    let created = Password::create_with_policy(&plaintext, &fast_policy()).unwrap();

    let restored = Password::from_hash(created.hash(), None, true);

    assert!(restored.matches_plaintext(&plaintext));
    assert_eq!(restored.verify(), Err(AuthError::PasswordMustChange));
}

#[test]
fn test_unsupported_cost_is_internal_error() {
    let policy = PasswordPolicyConfig::default().with_hash_cost(2);
    let result = Password::create_with_policy(&random_lowercase(10), &policy);

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
