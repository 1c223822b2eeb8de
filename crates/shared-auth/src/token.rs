//! HMAC token issue and verification.
//!
//! A token is the lowercase-hex HMAC-SHA3-256 digest of the UTF-8
//! concatenation `uid + timestamp`, keyed by the shared secret. Freshness
//! is bounded by an absolute window around the server clock, checked
//! before the signature so that replayed-but-valid tokens are reported as
//! expired, not forbidden.

use crate::errors::AuthError;
use chrono::{DateTime, NaiveDateTime, Utc};
use hmac::{Hmac, Mac};
use sha3::Sha3_256;
use std::time::Duration;

type HmacSha3 = Hmac<Sha3_256>;

/// Stateless token authenticator.
///
/// Holds the shared secret, the freshness window, and the datetime format
/// clients must use for the credential timestamp.
#[derive(Debug, Clone)]
pub struct TokenAuthenticator {
    secret_key: String,
    token_delay: Duration,
    datetime_format: String,
}

impl TokenAuthenticator {
    /// Default credential timestamp format (ISO-8601 with fractional
    /// seconds and a literal `Z`).
    pub const DEFAULT_DATETIME_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.fZ";

    /// Creates an authenticator.
    pub fn new(
        secret_key: impl Into<String>,
        token_delay: Duration,
        datetime_format: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            token_delay,
            datetime_format: datetime_format.into(),
        }
    }

    /// Computes the token for a uid/timestamp pair.
    ///
    /// Exposed so test clients and provisioning tooling can mint
    /// credentials with the same secret.
    pub fn issue(&self, uid: &str, timestamp: &str) -> String {
        let mut mac = HmacSha3::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any size");
        mac.update(uid.as_bytes());
        mac.update(timestamp.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Recomputes the token and compares in constant time.
    pub fn verify(&self, uid: &str, timestamp: &str, token: &str) -> bool {
        constant_time_compare(&self.issue(uid, timestamp), token)
    }

    /// Parses a credential timestamp with the configured format.
    pub fn parse_timestamp(&self, timestamp: &str) -> Result<DateTime<Utc>, AuthError> {
        NaiveDateTime::parse_from_str(timestamp, &self.datetime_format)
            .map(|naive| naive.and_utc())
            .map_err(|e| AuthError::MalformedTimestamp(e.to_string()))
    }

    /// Whether a timestamp falls outside the freshness window. The window
    /// is symmetric: a credential from the future is as stale as one from
    /// the past.
    pub fn is_expired(&self, timestamp: DateTime<Utc>) -> bool {
        self.is_expired_at(timestamp, Utc::now())
    }

    fn is_expired_at(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let skew = (now - timestamp).num_seconds().unsigned_abs();
        skew > self.token_delay.as_secs()
    }

    /// Full credential check: parse, expiry, then signature.
    ///
    /// Expiry runs first: an expired credential with a correct signature
    /// is still [`AuthError::Expired`].
    pub fn authenticate(&self, uid: &str, timestamp: &str, token: &str) -> Result<(), AuthError> {
        let parsed = self.parse_timestamp(timestamp)?;

        if self.is_expired(parsed) {
            return Err(AuthError::Expired);
        }

        if !self.verify(uid, timestamp, token) {
            return Err(AuthError::Forbidden);
        }

        Ok(())
    }
}

/// Constant-time string comparison.
///
/// Uses `subtle::ConstantTimeEq` so the comparison cost does not depend on
/// how many leading characters match.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    if a.len() != b.len() {
        return false;
    }

    a.as_bytes().ct_eq(b.as_bytes()).into()
}
