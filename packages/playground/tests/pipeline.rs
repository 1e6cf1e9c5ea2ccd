//! End-to-end runs of the demo pipeline and its stage diagnostics

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Duration;
use jwtplay::*;
use jwtplay_common::{ErrorKind, LoggingTransformer};
use jwtplay_jwt::{JwtToken, RsaKeyPair, MIN_RSA_BITS};
use once_cell::sync::Lazy;
use std::error::Error as _;
use std::io::{self, Write};

static KEYS: Lazy<RsaKeyPair> = Lazy::new(|| {
    LoggingTransformer::init_test();
    RsaKeyPair::generate(MIN_RSA_BITS).expect("key generation")
});

fn small_config() -> PlaygroundConfig {
    PlaygroundConfig::default().with_key_bits(MIN_RSA_BITS)
}

#[test]
fn test_default_config_matches_demo() {
    let config = PlaygroundConfig::default();
    assert_eq!(config.subject, "ckatzorke");
    assert_eq!(config.ttl, Duration::seconds(60));
    assert_eq!(config.key_bits, 4096);
    assert!(config.validate().is_ok());
}

#[test]
fn test_pipeline_recovers_subject_with_both_keys() {
    let report = run_with_keys(&small_config(), &KEYS).unwrap();

    assert_eq!(report.key_bits, MIN_RSA_BITS);
    assert_eq!(report.token.as_str().split('.').count(), 3);
    assert_eq!(report.original.subject(), "ckatzorke");
    assert_eq!(report.reconstructed, report.original);
    assert!(!report.public_key.is_empty());
}

#[test]
fn test_full_run_provisions_its_own_keys() {
    let config = small_config().with_subject("alice");
    let report = run(&config).unwrap();

    assert_eq!(report.key_bits, MIN_RSA_BITS);
    assert_eq!(report.reconstructed.subject(), "alice");
}

#[test]
fn test_token_expires_ttl_after_issuance() {
    let before = chrono::Utc::now().timestamp();
    let config = small_config().with_ttl(Duration::seconds(90));
    let report = run_with_keys(&config, &KEYS).unwrap();
    let after = chrono::Utc::now().timestamp();

    let exp = report.original.exp;
    assert!(exp >= before + 90 && exp <= after + 90);
}

#[test]
fn test_invalid_config_is_rejected_before_any_stage() {
    for config in [
        small_config().with_subject(""),
        small_config().with_ttl(Duration::zero()),
        small_config().with_key_bits(1024),
        small_config().with_key_bits(8192),
    ] {
        let error = run(&config).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::Configuration, "{config:?}");
    }
}

#[test]
fn test_provisioning_failure_names_its_stage() {
    let error = provision(&small_config().with_key_bits(1024)).unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::KeyProvisioning);
    assert_eq!(error.get_context(), Some("1024 bits"));
    assert!(error.source().is_some());
}

#[test]
fn test_foreign_token_fails_original_verification_stage() {
    let token = issue(&small_config(), &KEYS).unwrap();
    let other = RsaKeyPair::generate(MIN_RSA_BITS).unwrap();

    let error = verify_with_original(&token, &other).unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::TokenVerification);
    assert!(error.to_string().starts_with("token verification failed (original key)"));
}

#[test]
fn test_bad_public_key_text_fails_round_trip_stage() {
    let token = issue(&small_config(), &KEYS).unwrap();
    let public_key = export_public_key(&KEYS).unwrap();

    let error = verify_with_reconstructed(&token, &public_key[..public_key.len() - 8]).unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::KeyEncoding);
    assert_eq!(error.get_context(), Some("public key round-trip"));
}

#[test]
fn test_tampered_token_fails_reconstructed_verification_stage() {
    let public_key = export_public_key(&KEYS).unwrap();
    let token = issue(&small_config(), &KEYS).unwrap();
    let (signing_input, _) = token.as_str().rsplit_once('.').unwrap();
    let forged = JwtToken(format!("{signing_input}.AAAA"));

    let error = verify_with_reconstructed(&forged, &public_key).unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::TokenVerification);
    assert_eq!(error.get_context(), Some("reconstructed key"));
}

#[test]
fn test_ttl_beyond_representable_range_is_rejected() {
    let config = small_config().with_ttl(Duration::MAX);

    let error = config.validate().unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::Configuration);
    assert_eq!(error.get_context(), Some("ttl too large"));

    assert_eq!(run(&config).unwrap_err().kind(), &ErrorKind::Configuration);
    assert_eq!(
        run_with_keys(&config, &KEYS).unwrap_err().kind(),
        &ErrorKind::Configuration
    );

    let error = issue(&config, &KEYS).unwrap_err();
    assert_eq!(error.kind(), &ErrorKind::TokenIssuance);
    assert_eq!(error.get_context(), Some("expiration"));
}

#[test]
fn test_status_lines_are_split_between_streams() {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    let report = run_with_keys_to(&small_config(), &KEYS, &mut out, &mut diag).unwrap();
    let out = String::from_utf8(out).unwrap();
    let diag = String::from_utf8(diag).unwrap();

    assert_eq!(diag, format!("Public: {}\n", report.public_key));

    assert!(out.starts_with(&format!(
        "This is the base64 encoded token\n\t{}\n",
        report.token
    )));
    assert!(out.contains(&format!(
        "This is the verified and parsed body \n\t{}\n",
        report.original
    )));
    assert!(out.contains("This is the verified (from base64 String) and parsed body"));
    assert_eq!(out.matches("And the subject in there is \n\tckatzorke\n").count(), 2);
    assert!(!out.contains(&report.public_key));
}

#[test]
fn test_full_run_announces_key_size_before_public_key() {
    let mut out = Vec::new();
    let mut diag = Vec::new();
    run_to(&small_config(), &mut out, &mut diag).unwrap();
    let diag = String::from_utf8(diag).unwrap();

    let lines: Vec<&str> = diag.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Private: RSA private key, 2048 bits");
    assert!(lines[1].starts_with("Public: MII"));
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_failed_write_reports_output_stage() {
    let error =
        run_with_keys_to(&small_config(), &KEYS, &mut ClosedPipe, &mut Vec::new()).unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::Output);
    assert_eq!(error.source().map(ToString::to_string).as_deref(), Some("closed"));
}
