//! JWT claims and builder with compile-time validation.

use crate::{
    clock::{checked_expiration, Clock},
    error::JwtResult,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt};

/// Typestate markers for builder pattern.
pub mod ts {
    /// Marker for a field that has not been set.
    #[derive(Debug, Clone, Copy)]
    pub struct Unset;

    /// A field that has been set, holding its value.
    #[derive(Debug, Clone)]
    pub struct Set<T>(pub(crate) T);
}

/// Claims carried by a token.
///
/// Only handed out by verification after the signature and expiration checks
/// pass, or built locally for issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject.
    pub sub: String,
    /// Expiry (unix seconds).
    #[serde(deserialize_with = "numeric_date::required")]
    pub exp: i64,
    /// Issued-at (unix seconds).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "numeric_date::optional"
    )]
    pub iat: Option<i64>,
    /// Custom claims, flattened into the payload object.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// NumericDate parsing for tokens from other issuers.
///
/// RFC 7519 allows non-integer seconds; fractions are floored. Issued tokens
/// always carry integers.
mod numeric_date {
    use serde::de::{self, Deserialize, Deserializer, Visitor};
    use std::fmt;

    struct NumericDate(i64);

    impl<'de> Deserialize<'de> for NumericDate {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct NumericDateVisitor;

            impl<'de> Visitor<'de> for NumericDateVisitor {
                type Value = NumericDate;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a NumericDate (seconds since the epoch)")
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                    Ok(NumericDate(v))
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                    i64::try_from(v)
                        .map(NumericDate)
                        .map_err(|_| E::custom(format!("NumericDate {v} out of range")))
                }

                fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                        Ok(NumericDate(v.floor() as i64))
                    } else {
                        Err(E::custom(format!("NumericDate {v} out of range")))
                    }
                }
            }

            deserializer.deserialize_any(NumericDateVisitor)
        }
    }

    pub(super) fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        NumericDate::deserialize(deserializer).map(|date| date.0)
    }

    pub(super) fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        Option::<NumericDate>::deserialize(deserializer).map(|date| date.map(|d| d.0))
    }
}

impl Claims {
    /// Start building claims.
    #[must_use]
    pub fn builder() -> ClaimsBuilder {
        ClaimsBuilder::new()
    }

    /// The `sub` claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// The `exp` claim as an instant, if it is within chrono's range.
    #[must_use]
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// A custom claim by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

impl fmt::Display for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{{sub={}, exp={}}}", self.sub, self.exp),
        }
    }
}

/// Compile-time checked builder for JWT claims.
///
/// `build()` exists only once both the subject and the expiration are set.
#[derive(Debug, Clone)]
pub struct ClaimsBuilder<Sub = ts::Unset, Exp = ts::Unset> {
    sub: Sub,
    exp: Exp,
    iat: Option<i64>,
    extra: BTreeMap<String, Value>,
}

impl ClaimsBuilder {
    /// Create a new claims builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sub: ts::Unset,
            exp: ts::Unset,
            iat: None,
            extra: BTreeMap::new(),
        }
    }
}

impl Default for ClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Exp> ClaimsBuilder<ts::Unset, Exp> {
    /// Set the subject (sub) claim.
    #[must_use]
    pub fn subject(self, sub: impl Into<String>) -> ClaimsBuilder<ts::Set<String>, Exp> {
        ClaimsBuilder {
            sub: ts::Set(sub.into()),
            exp: self.exp,
            iat: self.iat,
            extra: self.extra,
        }
    }
}

impl<Sub> ClaimsBuilder<Sub, ts::Unset> {
    /// Set the expiration to an absolute instant.
    ///
    /// The instant is stored as unix seconds, so the timezone it was expressed
    /// in does not reach the token.
    #[must_use]
    pub fn expires_at<Tz: TimeZone>(self, at: DateTime<Tz>) -> ClaimsBuilder<Sub, ts::Set<i64>> {
        ClaimsBuilder {
            sub: self.sub,
            exp: ts::Set(at.timestamp()),
            iat: self.iat,
            extra: self.extra,
        }
    }

    /// Set the expiration to `ttl` after the clock's current instant.
    ///
    /// # Errors
    /// Returns `JwtError::TimeOutOfRange` if the expiration is not representable.
    pub fn expires_in(
        self,
        ttl: Duration,
        clock: &dyn Clock,
    ) -> JwtResult<ClaimsBuilder<Sub, ts::Set<i64>>> {
        Ok(self.expires_at(checked_expiration(clock.now(), ttl)?))
    }
}

impl<Sub, Exp> ClaimsBuilder<Sub, Exp> {
    /// Set the issued-at (iat) claim.
    #[must_use]
    pub fn issued_at(mut self, at: DateTime<Utc>) -> Self {
        self.iat = Some(at.timestamp());
        self
    }

    /// Add a custom claim.
    ///
    /// Registered names (`sub`, `exp`, `iat`) are managed by their own setters
    /// and are ignored here.
    #[must_use]
    pub fn claim(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if !matches!(name.as_str(), "sub" | "exp" | "iat") {
            self.extra.insert(name, value);
        }
        self
    }
}

impl ClaimsBuilder<ts::Set<String>, ts::Set<i64>> {
    /// Build the claims.
    #[must_use]
    pub fn build(self) -> Claims {
        Claims {
            sub: self.sub.0,
            exp: self.exp.0,
            iat: self.iat,
            extra: self.extra,
        }
    }
}
