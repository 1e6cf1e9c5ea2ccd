//! Capability traits the sign/verify contract is written against.
//!
//! Signing keys, key text encoding and the token wire format each sit behind
//! one of these traits. Implementations must be thread-safe (Send + Sync).

use crate::{
    claims::Claims,
    error::JwtResult,
    types::{Algorithm, JwtToken},
};
use std::sync::Arc;

/// Produces signatures with a private key.
pub trait KeySigner: Send + Sync {
    /// Algorithm this key signs with; written to the header `alg`.
    fn algorithm(&self) -> Algorithm;

    /// Sign `message`, returning the raw signature bytes.
    ///
    /// # Errors
    /// Returns `JwtError::Signing` if the primitive fails.
    fn sign(&self, message: &[u8]) -> JwtResult<Vec<u8>>;
}

/// Checks signatures with a public key.
pub trait KeyVerifier: Send + Sync {
    /// Algorithm this key verifies; tokens declaring anything else are rejected.
    fn algorithm(&self) -> Algorithm;

    /// Check `signature` over `message`.
    ///
    /// # Errors
    /// Returns `JwtError::SignatureInvalid` unless the signature matches.
    fn verify(&self, message: &[u8], signature: &[u8]) -> JwtResult<()>;
}

/// Text encoding for serialized public keys.
pub trait Base64Codec: Send + Sync {
    /// Render bytes as text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Parse text back to bytes.
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` for text outside the alphabet,
    /// bad padding or truncated input.
    fn decode(&self, text: &str) -> JwtResult<Vec<u8>>;
}

/// Issues and verifies tokens in a wire format.
pub trait TokenCodec: Send + Sync {
    /// Serialize and sign `claims`.
    ///
    /// # Errors
    /// Returns `JwtError::Serialization` or `JwtError::Signing`.
    fn issue(&self, claims: &Claims, signer: &dyn KeySigner) -> JwtResult<JwtToken>;

    /// Verify `token` and, only on success, return its claims.
    ///
    /// # Errors
    /// Returns `JwtError::TokenMalformed`, `JwtError::UnsupportedAlgorithm`,
    /// `JwtError::SignatureInvalid` or `JwtError::TokenExpired`.
    fn verify(&self, token: &str, verifier: &dyn KeyVerifier) -> JwtResult<Claims>;
}

/// Implementation of KeySigner for Arc<T> to allow shared ownership.
impl<T: KeySigner + ?Sized> KeySigner for Arc<T> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn sign(&self, message: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(message)
    }
}

/// Implementation of KeyVerifier for Arc<T> to allow shared ownership.
impl<T: KeyVerifier + ?Sized> KeyVerifier for Arc<T> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(message, signature)
    }
}
