//! Protocol error taxonomy.
//!
//! Every failure on a connection maps to exactly one of these kinds, and
//! each kind fixes two observable properties: the numeric code sent to the
//! client and whether the server closes the connection after reporting.

use thiserror::Error;

/// Numeric error codes carried in error response bodies.
pub mod codes {
    /// Malformed envelope/payload, or any unhandled handler failure.
    pub const BAD_REQUEST: u16 = 400;
    /// Signal requires an authenticated session.
    pub const UNAUTHORIZED: u16 = 401;
    /// Credential rejected (bad signature or expired token).
    pub const FORBIDDEN: u16 = 403;
    /// Unknown signal name.
    pub const NOT_FOUND: u16 = 404;
}

/// Failure kinds observable on a client connection.
///
/// Only `Forbidden` and `Unhandled` are terminal for the connection; the
/// rest leave it open for further signals.
#[derive(Debug, Clone, Error)]
pub enum ProtocolError {
    /// Malformed envelope or per-signal payload.
    #[error("bad request: {0}")]
    Validation(String),

    /// Signal requires an authenticated session.
    #[error("unauthorized request")]
    AuthRequired,

    /// Credential timestamp fell outside the freshness window.
    #[error("token is expired")]
    TokenExpired,

    /// Credential signature mismatch.
    #[error("forbidden request")]
    Forbidden,

    /// Unrecognized signal name.
    #[error("signal not found: {0}")]
    SignalNotFound(String),

    /// Any other failure during handler execution.
    #[error("internal failure: {0}")]
    Unhandled(String),
}

impl ProtocolError {
    /// Numeric code reported to the client.
    pub fn code(&self) -> u16 {
        match self {
            ProtocolError::Validation(_) | ProtocolError::Unhandled(_) => codes::BAD_REQUEST,
            ProtocolError::AuthRequired => codes::UNAUTHORIZED,
            ProtocolError::TokenExpired | ProtocolError::Forbidden => codes::FORBIDDEN,
            ProtocolError::SignalNotFound(_) => codes::NOT_FOUND,
        }
    }

    /// Whether the server closes the connection after sending the error
    /// frame. An expired token is reported but recoverable; a bad
    /// signature is terminal.
    pub fn closes_connection(&self) -> bool {
        matches!(
            self,
            ProtocolError::Forbidden | ProtocolError::Unhandled(_)
        )
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Validation(e.to_string())
    }
}

/// Result alias for protocol handlers.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
