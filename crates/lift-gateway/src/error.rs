//! Gateway-level errors (startup and transport, not per-connection).

use thiserror::Error;

/// Failures that prevent the gateway from serving.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener socket bind error.
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server loop failure.
    #[error("server error: {0}")]
    Serve(String),
}
