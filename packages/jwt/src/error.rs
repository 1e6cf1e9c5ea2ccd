//! JWT error types

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors raised while provisioning keys, issuing tokens or verifying them
///
/// Every failure mode of verification has its own variant so callers can tell a
/// tampered token from an expired one. None of them carry key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// RSA key generation failed or the requested modulus size is not supported
    #[error("RSA key generation failed: {0}")]
    KeyGeneration(String),

    /// Token is not a well-formed compact JWT
    #[error("Malformed token: {0}")]
    TokenMalformed(String),

    /// Header names an algorithm this crate does not implement, or not the one
    /// the verifying key is bound to
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the header and payload under the given key
    #[error("Invalid token signature")]
    SignatureInvalid,

    /// The `exp` claim has been reached
    #[error("Token expired at {expired_at} (now {now})")]
    TokenExpired {
        /// Value of the `exp` claim, unix seconds
        expired_at: i64,
        /// Verification time, unix seconds
        now: i64,
    },

    /// Public key text or bytes could not be decoded into a key
    #[error("Invalid public key encoding: {0}")]
    KeyEncodingInvalid(String),

    /// Header or claims could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The signing primitive failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// An instant computed from a clock and a lifetime is not representable
    #[error("Time out of range: {0}")]
    TimeOutOfRange(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JwtError::TokenMalformed(msg.to_string())
    }

    /// Create an invalid key encoding error
    #[inline]
    #[must_use]
    pub fn key_encoding(msg: &str) -> Self {
        JwtError::KeyEncodingInvalid(msg.to_string())
    }

    /// Create a key generation error
    #[inline]
    #[must_use]
    pub fn key_generation(msg: &str) -> Self {
        JwtError::KeyGeneration(msg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create a time out of range error
    #[inline]
    #[must_use]
    pub fn time_out_of_range(msg: &str) -> Self {
        JwtError::TimeOutOfRange(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        JwtError::Signing(msg.to_string())
    }
}
