//! RSA key provisioning and public key encoding
//!
//! Key pairs are generated fresh from the operating system's secure RNG and
//! live only in memory. Public keys travel as base64 text of their X.509
//! SubjectPublicKeyInfo DER encoding.

use crate::{
    codec::StandardBase64,
    crypto::rs512::{Rs512Signer, Rs512Verifier},
    error::{JwtError, JwtResult},
    traits::Base64Codec,
};
use rsa::{
    pkcs8::{DecodePublicKey, EncodePublicKey},
    traits::PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};
use std::fmt;

/// Modulus size used when none is requested
pub const DEFAULT_RSA_BITS: usize = 4096;

/// Smallest modulus accepted for RS512 signing keys
pub const MIN_RSA_BITS: usize = 2048;

/// Largest modulus accepted; SPKI decoding refuses anything bigger
pub const MAX_RSA_BITS: usize = 4096;

/// An RSA key pair held in memory for the lifetime of a run
#[derive(Clone)]
pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl RsaKeyPair {
    /// Generate a fresh key pair with a `bits`-bit modulus
    ///
    /// # Errors
    /// Returns `JwtError::KeyGeneration` if `bits` is outside
    /// `MIN_RSA_BITS..=MAX_RSA_BITS` or the RNG/algorithm fails.
    pub fn generate(bits: usize) -> JwtResult<Self> {
        if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&bits) {
            return Err(JwtError::KeyGeneration(format!(
                "modulus of {bits} bits is outside {MIN_RSA_BITS}..={MAX_RSA_BITS}"
            )));
        }

        tracing::debug!(bits, "generating RSA key pair");
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| JwtError::key_generation(&e.to_string()))?;

        Ok(Self::from_private_key(private_key))
    }

    /// Wrap an existing private key, deriving its public half
    #[must_use]
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let public_key = RsaPublicKey::from(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    /// The private half; keep it secret
    #[must_use]
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// The shareable public half
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Modulus size in bits
    #[must_use]
    pub fn bits(&self) -> usize {
        self.public_key.size() * 8
    }

    /// RS512 signer over the private key
    #[must_use]
    pub fn signer(&self) -> Rs512Signer {
        Rs512Signer::new(self.private_key.clone())
    }

    /// RS512 verifier over the public key
    #[must_use]
    pub fn verifier(&self) -> Rs512Verifier {
        Rs512Verifier::new(self.public_key.clone())
    }
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// X.509 SubjectPublicKeyInfo DER encoding of an RSA public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyEncoding {
    der: Vec<u8>,
}

impl PublicKeyEncoding {
    /// Serialize a public key
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` if the key cannot be DER encoded.
    pub fn from_public_key(public_key: &RsaPublicKey) -> JwtResult<Self> {
        let document = public_key
            .to_public_key_der()
            .map_err(|e| JwtError::KeyEncodingInvalid(format!("SPKI encoding failed: {e}")))?;
        Ok(Self {
            der: document.as_bytes().to_vec(),
        })
    }

    /// Take raw DER bytes, checking that they hold an RSA public key
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` if the bytes are not an RSA SPKI structure.
    pub fn from_der(der: &[u8]) -> JwtResult<Self> {
        parse_spki(der)?;
        Ok(Self { der: der.to_vec() })
    }

    /// Decode standard base64 text
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` for malformed or truncated base64,
    /// or bytes that are not an RSA SPKI structure.
    pub fn from_base64(text: &str) -> JwtResult<Self> {
        Self::from_base64_with(&StandardBase64, text)
    }

    /// Decode base64 text with an alternate codec
    ///
    /// # Errors
    /// Same as [`PublicKeyEncoding::from_base64`].
    pub fn from_base64_with(codec: &dyn Base64Codec, text: &str) -> JwtResult<Self> {
        let der = codec.decode(text.trim())?;
        Self::from_der(&der)
    }

    /// The DER bytes
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Standard base64 text of the DER bytes
    #[must_use]
    pub fn to_base64(&self) -> String {
        self.to_base64_with(&StandardBase64)
    }

    /// Base64 text of the DER bytes with an alternate codec
    #[must_use]
    pub fn to_base64_with(&self, codec: &dyn Base64Codec) -> String {
        codec.encode(&self.der)
    }

    /// Reconstruct the public key
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` if the bytes no longer parse.
    pub fn to_public_key(&self) -> JwtResult<RsaPublicKey> {
        parse_spki(&self.der)
    }
}

impl fmt::Display for PublicKeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

fn parse_spki(der: &[u8]) -> JwtResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| JwtError::key_encoding(&format!("not an RSA SubjectPublicKeyInfo: {e}")))
}
