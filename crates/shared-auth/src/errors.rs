//! Authentication failure outcomes.

use thiserror::Error;

/// Why a credential was rejected.
///
/// Callers must be able to distinguish a stale-but-honest credential from
/// a forged one: the first is recoverable (the client can re-request a
/// token), the second is terminal for the connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential timestamp could not be parsed with the configured
    /// datetime format.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// The credential timestamp fell outside the freshness window.
    #[error("token is expired")]
    Expired,

    /// The token did not match the recomputed signature.
    #[error("forbidden request")]
    Forbidden,
}
