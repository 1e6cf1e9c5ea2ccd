//! Tests for stage tagging and context propagation on the common error type

#![allow(clippy::unwrap_used)]

use jwtplay_common::{Error, ErrorKind, LoggingTransformer, ResultExt};
use std::error::Error as _;
use std::fmt;

#[derive(Debug)]
struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signature rejected")
    }
}

impl std::error::Error for Rejected {}

#[test]
fn test_stage_preserves_source() {
    LoggingTransformer::init_test();

    let result: Result<(), Rejected> = Err(Rejected);
    let error = result.stage(ErrorKind::TokenVerification).unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::TokenVerification);
    assert!(error.get_context().is_none());
    let source = error.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("signature rejected"));
}

#[test]
fn test_display_names_stage_context_and_cause() {
    let result: Result<(), Rejected> = Err(Rejected);
    let error = result
        .stage_context(ErrorKind::TokenVerification, "reconstructed public key")
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "token verification failed (reconstructed public key)\nCaused by: signature rejected"
    );
}

#[test]
fn test_first_context_is_attached_in_place() {
    let error = Error::new(ErrorKind::KeyEncoding).context("base64 text");

    assert_eq!(error.kind(), &ErrorKind::KeyEncoding);
    assert_eq!(error.get_context(), Some("base64 text"));
    assert!(error.source().is_none());
}

#[test]
fn test_second_context_wraps_previous_error() {
    let error = Error::new(ErrorKind::TokenIssuance)
        .context("signing")
        .context("demo pipeline");

    assert_eq!(error.get_context(), Some("demo pipeline"));
    let inner = error.source().map(ToString::to_string);
    assert_eq!(inner.as_deref(), Some("token issuance failed (signing)"));
}

#[test]
fn test_context_on_shared_error_keeps_clone_intact() {
    let original = Error::new(ErrorKind::KeyProvisioning);
    let shared = original.clone();
    let annotated = original.context("4096 bits");

    assert!(shared.get_context().is_none());
    assert_eq!(annotated.get_context(), Some("4096 bits"));
    assert_eq!(annotated.kind(), &ErrorKind::KeyProvisioning);
}

#[test]
fn test_display_lists_each_link_of_the_chain_once() {
    let result: Result<(), Rejected> = Err(Rejected);
    let error = result
        .stage_context(ErrorKind::TokenVerification, "reconstructed key")
        .map_err(|e| e.context("second run"))
        .unwrap_err();

    assert_eq!(
        error.to_string(),
        "token verification failed (second run)\n\
         Caused by: token verification failed (reconstructed key)\n\
         Caused by: signature rejected"
    );
    assert_eq!(format!("{error:?}"), error.to_string());
}

#[test]
fn test_configuration_and_output_kinds_display() {
    assert_eq!(Error::configuration().to_string(), "configuration error");
    assert_eq!(
        Error::new(ErrorKind::Output).context("stdout closed").to_string(),
        "writing demo output failed (stdout closed)"
    );
}
