//! Time sources for issuing and verifying tokens.
//!
//! Tokens carry `exp` as an absolute instant. The issuer computes it once from
//! its own clock; the verifier compares it against whatever [`Clock`] it was
//! built with, so tests can move time without sleeping.

use crate::error::{JwtError, JwtResult};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Clock that always reports `instant`.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Same clock moved forward (or back, for negative `by`).
    ///
    /// Saturates at the bounds of `DateTime<Utc>`.
    #[must_use]
    pub fn advanced_by(self, by: Duration) -> Self {
        let bound = if by < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        Self {
            instant: self.instant.checked_add_signed(by).unwrap_or(bound),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// `at + ttl` as a UTC instant.
///
/// # Errors
/// Returns `JwtError::TimeOutOfRange` if the sum leaves chrono's range.
pub fn checked_expiration<Tz: TimeZone>(
    at: DateTime<Tz>,
    ttl: Duration,
) -> JwtResult<DateTime<Utc>> {
    let at = at.with_timezone(&Utc);
    at.checked_add_signed(ttl).ok_or_else(|| {
        JwtError::time_out_of_range(&format!(
            "{}s after {at} is not representable",
            ttl.num_seconds()
        ))
    })
}

/// `ttl` from now on the local wall clock, as an absolute UTC instant.
///
/// The local offset only matters for reading the clock; the returned instant is
/// the same whatever timezone the verifier runs in.
///
/// # Errors
/// Returns `JwtError::TimeOutOfRange` if `ttl` pushes the instant past the
/// range chrono can represent.
pub fn local_expiration(ttl: Duration) -> JwtResult<DateTime<Utc>> {
    checked_expiration(Local::now(), ttl)
}
