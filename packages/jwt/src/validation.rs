//! Time-based claim checks

use crate::{
    claims::Claims,
    error::{JwtError, JwtResult},
};
use chrono::{DateTime, Utc};

/// Reject claims whose expiration has been reached at `now`.
///
/// A token is valid strictly before `exp`; at `exp` itself it has expired.
///
/// # Errors
/// Returns `JwtError::TokenExpired` when `now >= exp`.
pub fn validate_expiration(claims: &Claims, now: DateTime<Utc>) -> JwtResult<()> {
    let now = now.timestamp();
    if now >= claims.exp {
        return Err(JwtError::TokenExpired {
            expired_at: claims.exp,
            now,
        });
    }
    Ok(())
}
