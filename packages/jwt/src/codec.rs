//! Base64 and compact JWT codecs
//!
//! Compact tokens are `header.payload.signature`, each segment base64url
//! without padding (RFC 7515). Public key text uses the standard alphabet
//! with padding.

use crate::{
    claims::Claims,
    clock::{Clock, SystemClock},
    error::{JwtError, JwtResult},
    traits::{Base64Codec, KeySigner, KeyVerifier, TokenCodec},
    types::{JwtHeader, JwtToken},
    validation::validate_expiration,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};

/// Standard alphabet, padded base64
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBase64;

impl Base64Codec for StandardBase64 {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> JwtResult<Vec<u8>> {
        STANDARD
            .decode(text)
            .map_err(|e| JwtError::KeyEncodingInvalid(format!("invalid base64: {e}")))
    }
}

/// Base64 URL-safe encoding without padding (RFC 7515)
#[inline]
fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding (RFC 7515)
#[inline]
fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// The three segments of a compact token, still untrusted
struct CompactParts<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
    signing_input: &'a str,
}

impl<'a> CompactParts<'a> {
    fn split(token: &'a str) -> JwtResult<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(JwtError::TokenMalformed(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }

        for (name, segment) in ["header", "payload", "signature"].iter().zip(&segments) {
            if segment.is_empty() {
                return Err(JwtError::TokenMalformed(format!("{name} segment is empty")));
            }
            if !segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
            {
                return Err(JwtError::TokenMalformed(format!(
                    "{name} segment is not base64url"
                )));
            }
        }

        let signing_input_len = segments[0].len() + 1 + segments[1].len();
        Ok(Self {
            header: segments[0],
            payload: segments[1],
            signature: segments[2],
            signing_input: &token[..signing_input_len],
        })
    }
}

/// JWS compact serialization of signed claims
///
/// Verification checks, in order: segment structure, header algorithm,
/// signature, payload shape, expiration. The payload is not decoded until the
/// signature over it has verified.
#[derive(Debug, Clone, Default)]
pub struct CompactCodec<C = SystemClock> {
    clock: C,
}

impl CompactCodec {
    /// Codec verifying expiration against the wall clock
    #[must_use]
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> CompactCodec<C> {
    /// Codec verifying expiration against `clock`
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// The clock expiration is checked against
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn verify_parts(&self, token: &str, verifier: &dyn KeyVerifier) -> JwtResult<Claims> {
        let parts = CompactParts::split(token)?;

        let header_bytes = base64_url_decode(parts.header)
            .map_err(|_| JwtError::malformed("header is not base64url"))?;
        let header: JwtHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| JwtError::TokenMalformed(format!("header: {e}")))?;

        let algorithm = header.algorithm()?;
        if algorithm != verifier.algorithm() {
            return Err(JwtError::UnsupportedAlgorithm(format!(
                "{algorithm} (verifying key is bound to {})",
                verifier.algorithm()
            )));
        }

        let signature = base64_url_decode(parts.signature)
            .map_err(|_| JwtError::malformed("signature is not base64url"))?;
        verifier.verify(parts.signing_input.as_bytes(), &signature)?;

        let payload_bytes = base64_url_decode(parts.payload)
            .map_err(|_| JwtError::malformed("payload is not base64url"))?;
        let claims: Claims = serde_json::from_slice(&payload_bytes)
            .map_err(|e| JwtError::TokenMalformed(format!("claims: {e}")))?;

        validate_expiration(&claims, self.clock.now())?;

        Ok(claims)
    }
}

impl<C: Clock> TokenCodec for CompactCodec<C> {
    fn issue(&self, claims: &Claims, signer: &dyn KeySigner) -> JwtResult<JwtToken> {
        let header = JwtHeader::new(signer.algorithm());

        let header_json =
            serde_json::to_vec(&header).map_err(|e| JwtError::serialization(&e.to_string()))?;
        let claims_json =
            serde_json::to_vec(claims).map_err(|e| JwtError::serialization(&e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            base64_url_encode(&header_json),
            base64_url_encode(&claims_json)
        );
        let signature = signer.sign(signing_input.as_bytes())?;

        tracing::debug!(alg = %header.alg, exp = claims.exp, "issued token");
        Ok(JwtToken(format!(
            "{signing_input}.{}",
            base64_url_encode(&signature)
        )))
    }

    fn verify(&self, token: &str, verifier: &dyn KeyVerifier) -> JwtResult<Claims> {
        match self.verify_parts(token, verifier) {
            Ok(claims) => {
                tracing::debug!(exp = claims.exp, "token verified");
                Ok(claims)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token rejected");
                Err(e)
            }
        }
    }
}
