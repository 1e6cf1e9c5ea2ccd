//! Demo configuration.

use chrono::Duration;
use jwtplay_common::{Error, ErrorKind, Result, ResultExt};
use jwtplay_jwt::{local_expiration, DEFAULT_RSA_BITS, MAX_RSA_BITS, MIN_RSA_BITS};

/// Inputs of the demo pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaygroundConfig {
    /// Subject placed in the issued token.
    pub subject: String,
    /// Lifetime of the token, counted from issuance.
    pub ttl: Duration,
    /// RSA modulus size in bits.
    pub key_bits: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            subject: "ckatzorke".to_string(),
            ttl: Duration::seconds(60),
            key_bits: DEFAULT_RSA_BITS,
        }
    }
}

impl PlaygroundConfig {
    /// Set the token subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the token lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the RSA modulus size.
    #[must_use]
    pub fn with_key_bits(mut self, key_bits: usize) -> Self {
        self.key_bits = key_bits;
        self
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// # Errors
    /// Returns a configuration error for an empty subject, a lifetime that is
    /// not positive or whose expiry cannot be represented, or a modulus outside
    /// the supported range.
    pub fn validate(&self) -> Result<()> {
        if self.subject.is_empty() {
            return Err(Error::configuration().context("subject is empty"));
        }
        if self.ttl <= Duration::zero() {
            return Err(Error::configuration().context(format!(
                "ttl must be positive, got {}s",
                self.ttl.num_seconds()
            )));
        }
        local_expiration(self.ttl).stage_context(ErrorKind::Configuration, "ttl too large")?;
        if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&self.key_bits) {
            return Err(Error::configuration().context(format!(
                "key_bits must be within {MIN_RSA_BITS}..={MAX_RSA_BITS}, got {}",
                self.key_bits
            )));
        }
        Ok(())
    }
}
