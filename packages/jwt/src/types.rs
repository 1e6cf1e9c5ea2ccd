//! JWT header and algorithm identifiers

use crate::error::JwtError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Signature algorithms this crate can issue and verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 using SHA-512
    Rs512,
}

impl Algorithm {
    /// Header `alg` value
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Rs512 => "RS512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    /// Parse a header `alg` value; `"none"` and every other name is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RS512" => Ok(Algorithm::Rs512),
            other => Err(JwtError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Algorithm used for signing
    pub alg: String,
    /// Token type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl JwtHeader {
    /// Header for a token signed with `algorithm`
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: algorithm.name().to_string(),
            typ: Some("JWT".to_string()),
        }
    }

    /// The declared algorithm, if it is one this crate implements
    ///
    /// # Errors
    /// Returns `JwtError::UnsupportedAlgorithm` for any other `alg` value.
    pub fn algorithm(&self) -> Result<Algorithm, JwtError> {
        self.alg.parse()
    }
}

/// JWT token string wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtToken(pub String);

impl JwtToken {
    /// The compact `header.payload.signature` form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JwtToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for JwtToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JwtToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
