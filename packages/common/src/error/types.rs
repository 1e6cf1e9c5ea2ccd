//! Core error types and definitions

use std::sync::Arc;
use thiserror::Error;

/// Core error type with context propagation support
///
/// `Debug` renders the same text as `Display`.
#[derive(Clone)]
pub struct Error {
    /// The actual error
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(super) struct ErrorInner {
    /// The error kind
    pub kind: ErrorKind,
    /// Optional error context
    pub context: Option<String>,
    /// Optional source error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// The stage of the sign/verify pipeline an error was raised in
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Generating the RSA key pair
    #[error("key provisioning failed")]
    KeyProvisioning,

    /// Building and signing the token
    #[error("token issuance failed")]
    TokenIssuance,

    /// Checking a token against a public key
    #[error("token verification failed")]
    TokenVerification,

    /// Serializing or reconstructing a public key
    #[error("public key encoding failed")]
    KeyEncoding,

    /// Invalid program configuration
    #[error("configuration error")]
    Configuration,

    /// Writing a status line failed
    #[error("writing demo output failed")]
    Output,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
