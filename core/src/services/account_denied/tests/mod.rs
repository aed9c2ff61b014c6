//! Tests for the account denied service

mod store_tests;
