//! The demo stages, each tagging its failures with the stage it belongs to.
//!
//! Status lines go to two writers: key material to the diagnostic stream,
//! the token and verified claims to the output stream.

use crate::config::PlaygroundConfig;
use jwtplay_common::{ErrorKind, LoggingTransformer, Result, ResultExt};
use jwtplay_jwt::{
    local_expiration, Claims, CompactCodec, JwtToken, PublicKeyEncoding, Rs512Verifier,
    RsaKeyPair, TokenCodec,
};
use std::{
    fmt,
    io::{self, Write},
    time::Instant,
};

/// Everything the pipeline produced, in stage order.
#[derive(Debug)]
pub struct PipelineReport {
    /// Modulus size of the provisioned key pair.
    pub key_bits: usize,
    /// Base64 SubjectPublicKeyInfo text of the public key.
    pub public_key: String,
    /// The issued compact token.
    pub token: JwtToken,
    /// Claims recovered with the original public key.
    pub original: Claims,
    /// Claims recovered with the public key rebuilt from `public_key`.
    pub reconstructed: Claims,
}

fn emit<W: Write>(writer: &mut W, line: fmt::Arguments<'_>) -> Result<()> {
    writeln!(writer, "{line}").stage(ErrorKind::Output)
}

fn timed<T>(operation: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let result = f();
    LoggingTransformer::log_performance_metric(operation, start.elapsed(), result.is_ok());
    result
}

/// Generate a fresh key pair of `config.key_bits`.
///
/// # Errors
/// Fails at the key provisioning stage.
pub fn provision(config: &PlaygroundConfig) -> Result<RsaKeyPair> {
    timed("key provisioning", || {
        RsaKeyPair::generate(config.key_bits)
            .stage_context(ErrorKind::KeyProvisioning, format!("{} bits", config.key_bits))
    })
}

/// Base64 text of the public half of `keys`.
///
/// # Errors
/// Fails at the public key round-trip stage.
pub fn export_public_key(keys: &RsaKeyPair) -> Result<String> {
    PublicKeyEncoding::from_public_key(keys.public_key())
        .map(|encoding| encoding.to_base64())
        .stage_context(ErrorKind::KeyEncoding, "public key round-trip")
}

/// Sign a token for `config.subject` expiring `config.ttl` from now.
///
/// # Errors
/// Fails at the token issuance stage.
pub fn issue(config: &PlaygroundConfig, keys: &RsaKeyPair) -> Result<JwtToken> {
    let expiration = local_expiration(config.ttl)
        .stage_context(ErrorKind::TokenIssuance, "expiration")?;
    let claims = Claims::builder()
        .subject(config.subject.as_str())
        .expires_at(expiration)
        .build();

    timed("token issuance", || {
        CompactCodec::new()
            .issue(&claims, &keys.signer())
            .stage(ErrorKind::TokenIssuance)
    })
}

/// Verify `token` with the public key held in memory.
///
/// # Errors
/// Fails at the verification with original key stage.
pub fn verify_with_original(token: &JwtToken, keys: &RsaKeyPair) -> Result<Claims> {
    timed("verification with original key", || {
        CompactCodec::new()
            .verify(token.as_str(), &keys.verifier())
            .stage_context(ErrorKind::TokenVerification, "original key")
    })
}

/// Rebuild the public key from `public_key` text and verify `token` with it.
///
/// # Errors
/// Fails at the public key round-trip stage when the text does not decode, or
/// at the verification with reconstructed key stage.
pub fn verify_with_reconstructed(token: &JwtToken, public_key: &str) -> Result<Claims> {
    let verifier = PublicKeyEncoding::from_base64(public_key)
        .and_then(|encoding| Rs512Verifier::from_encoding(&encoding))
        .stage_context(ErrorKind::KeyEncoding, "public key round-trip")?;

    timed("verification with reconstructed key", || {
        CompactCodec::new()
            .verify(token.as_str(), &verifier)
            .stage_context(ErrorKind::TokenVerification, "reconstructed key")
    })
}

/// Run every stage after provisioning against existing `keys`.
///
/// # Errors
/// Returns the first failing stage.
pub fn run_with_keys(config: &PlaygroundConfig, keys: &RsaKeyPair) -> Result<PipelineReport> {
    run_with_keys_to(config, keys, &mut io::sink(), &mut io::sink())
}

/// [`run_with_keys`], printing each stage's status line as it completes.
///
/// # Errors
/// Returns the first failing stage, or `ErrorKind::Output` if a writer fails.
pub fn run_with_keys_to<O: Write, D: Write>(
    config: &PlaygroundConfig,
    keys: &RsaKeyPair,
    out: &mut O,
    diag: &mut D,
) -> Result<PipelineReport> {
    config.validate()?;

    let public_key = export_public_key(keys)?;
    emit(diag, format_args!("Public: {public_key}"))?;

    let token = issue(config, keys)?;
    emit(out, format_args!("This is the base64 encoded token\n\t{token}"))?;

    let original = verify_with_original(&token, keys)?;
    emit(out, format_args!("This is the verified and parsed body \n\t{original}"))?;
    emit(out, format_args!("And the subject in there is \n\t{}", original.subject()))?;

    let reconstructed = verify_with_reconstructed(&token, &public_key)?;
    emit(
        out,
        format_args!("This is the verified (from base64 String) and parsed body \n\t{reconstructed}"),
    )?;
    emit(out, format_args!("And the subject in there is \n\t{}", reconstructed.subject()))?;

    log::info!("pipeline completed for subject {}", original.subject());
    Ok(PipelineReport {
        key_bits: keys.bits(),
        public_key,
        token,
        original,
        reconstructed,
    })
}

/// Provision a key pair and run the whole pipeline.
///
/// # Errors
/// Returns the first failing stage.
pub fn run(config: &PlaygroundConfig) -> Result<PipelineReport> {
    run_to(config, &mut io::sink(), &mut io::sink())
}

/// [`run`], printing each stage's status line as it completes.
///
/// # Errors
/// Returns the first failing stage, or `ErrorKind::Output` if a writer fails.
pub fn run_to<O: Write, D: Write>(
    config: &PlaygroundConfig,
    out: &mut O,
    diag: &mut D,
) -> Result<PipelineReport> {
    config.validate()?;
    let keys = provision(config)?;
    emit(diag, format_args!("Private: RSA private key, {} bits", keys.bits()))?;
    run_with_keys_to(config, &keys, out, diag)
}
