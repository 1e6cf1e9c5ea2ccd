//! RS512 (RSASSA-PKCS1-v1_5 with SHA-512) signing and verification

use crate::{
    error::{JwtError, JwtResult},
    keys::PublicKeyEncoding,
    traits::{KeySigner, KeyVerifier},
    types::Algorithm,
};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha512;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{traits::PublicKeyParts, RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// RS512 signer over an RSA private key
#[derive(Clone)]
pub struct Rs512Signer {
    private_key: RsaPrivateKey,
}

impl Rs512Signer {
    /// Bind a private key to RS512
    #[must_use]
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }
}

impl KeySigner for Rs512Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rs512
    }

    fn sign(&self, message: &[u8]) -> JwtResult<Vec<u8>> {
        let signing_key = SigningKey::<Sha512>::new(self.private_key.clone());
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| JwtError::signing(&e.to_string()))?;
        Ok(signature.to_bytes().as_ref().to_vec())
    }
}

impl fmt::Debug for Rs512Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rs512Signer")
            .field("bits", &(self.private_key.size() * 8))
            .finish_non_exhaustive()
    }
}

/// RS512 verifier over an RSA public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rs512Verifier {
    public_key: RsaPublicKey,
}

impl Rs512Verifier {
    /// Bind a public key to RS512
    #[must_use]
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// The bound public key
    #[must_use]
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Reconstruct the public key from its SPKI encoding and bind it to RS512
    ///
    /// # Errors
    /// Returns `JwtError::KeyEncodingInvalid` if the encoding does not parse.
    pub fn from_encoding(encoding: &PublicKeyEncoding) -> JwtResult<Self> {
        Ok(Self::new(encoding.to_public_key()?))
    }
}

impl KeyVerifier for Rs512Verifier {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rs512
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> JwtResult<()> {
        let signature = Signature::try_from(signature).map_err(|_| JwtError::SignatureInvalid)?;

        VerifyingKey::<Sha512>::new(self.public_key.clone())
            .verify(message, &signature)
            .map_err(|_| JwtError::SignatureInvalid)
    }
}
