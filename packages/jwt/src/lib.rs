//! RS512 JSON Web Tokens over in-memory RSA keys
//!
//! This crate provides:
//! - RSA key pair provisioning from the OS secure RNG
//! - Token issuance and verification in JWS compact form, RS512 only
//! - Lossless public key round-trips through base64 SubjectPublicKeyInfo text
//! - Capability traits ([`KeySigner`], [`KeyVerifier`], [`Base64Codec`],
//!   [`TokenCodec`]) so alternate backends can be swapped in
//!
//! ```ignore
//! use jwtplay_jwt::*;
//!
//! let keys = RsaKeyPair::generate(DEFAULT_RSA_BITS)?;
//! let claims = Claims::builder()
//!     .subject("ckatzorke")
//!     .expires_at(local_expiration(chrono::Duration::minutes(1))?)
//!     .build();
//!
//! let codec = CompactCodec::new();
//! let token = codec.issue(&claims, &keys.signer())?;
//!
//! let encoded = PublicKeyEncoding::from_public_key(keys.public_key())?.to_base64();
//! let verifier = Rs512Verifier::from_encoding(&PublicKeyEncoding::from_base64(&encoded)?)?;
//! assert_eq!(codec.verify(token.as_str(), &verifier)?.subject(), "ckatzorke");
//! ```

pub mod claims;
pub mod clock;
pub mod codec;
pub mod crypto;
mod error;
pub mod keys;
pub mod traits;
mod types;
pub mod validation;

pub use claims::{Claims, ClaimsBuilder};
pub use clock::{checked_expiration, local_expiration, Clock, FixedClock, SystemClock};
pub use codec::{CompactCodec, StandardBase64};
pub use crypto::rs512::{Rs512Signer, Rs512Verifier};
pub use error::*;
pub use keys::{PublicKeyEncoding, RsaKeyPair, DEFAULT_RSA_BITS, MAX_RSA_BITS, MIN_RSA_BITS};
pub use traits::{Base64Codec, KeySigner, KeyVerifier, TokenCodec};
pub use types::*;
pub use validation::validate_expiration;
