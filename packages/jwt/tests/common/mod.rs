//! Shared fixtures for the integration tests
//!
//! RSA generation dominates test time, so each test binary generates its key
//! pairs once, at the smallest accepted modulus.

#![allow(dead_code, clippy::expect_used)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use jwtplay_common::LoggingTransformer;
use jwtplay_jwt::{Claims, RsaKeyPair, MIN_RSA_BITS};
use once_cell::sync::Lazy;

pub static ISSUER_KEYS: Lazy<RsaKeyPair> = Lazy::new(|| {
    LoggingTransformer::init_test();
    RsaKeyPair::generate(MIN_RSA_BITS).expect("issuer key generation")
});

pub static OTHER_KEYS: Lazy<RsaKeyPair> =
    Lazy::new(|| RsaKeyPair::generate(MIN_RSA_BITS).expect("second key generation"));

pub fn claims_expiring_at(subject: &str, exp: DateTime<Utc>) -> Claims {
    Claims::builder().subject(subject).expires_at(exp).build()
}

pub fn claims_valid_for(subject: &str, ttl: Duration) -> Claims {
    claims_expiring_at(subject, Utc::now() + ttl)
}

pub fn b64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Replace one character in the middle of `segment` with a different
/// base64url character.
pub fn flip_middle_char(segment: &str) -> String {
    let mut chars: Vec<char> = segment.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

pub fn segments(token: &str) -> Vec<String> {
    token.split('.').map(str::to_string).collect()
}
