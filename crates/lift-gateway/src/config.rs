//! Gateway configuration with validation.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use shared_auth::TokenAuthenticator;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Client-facing server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Maximum inbound frame size in bytes; larger frames get a
    /// validation error without being parsed.
    pub max_message_size: usize,
    /// Credential checking parameters.
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            max_message_size: 64 * 1024,
            auth: AuthConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.auth.secret_key.is_empty() {
            return Err(GatewayError::Config(
                "auth.secret_key must be set; refusing to start with an empty secret".into(),
            ));
        }
        if self.auth.token_delay_secs == 0 {
            return Err(GatewayError::Config(
                "auth.token_delay_secs cannot be 0".into(),
            ));
        }
        if self.max_message_size == 0 {
            return Err(GatewayError::Config("max_message_size cannot be 0".into()));
        }
        Ok(())
    }

    /// Bind address for the listener.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Builds the token authenticator from the auth section.
    pub fn authenticator(&self) -> TokenAuthenticator {
        TokenAuthenticator::new(
            self.auth.secret_key.clone(),
            Duration::from_secs(self.auth.token_delay_secs),
            self.auth.datetime_format.clone(),
        )
    }
}

/// Credential checking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret for the token keyed hash. No default: an empty
    /// secret fails validation.
    pub secret_key: String,
    /// Freshness window in seconds, applied symmetrically around the
    /// server clock.
    pub token_delay_secs: u64,
    /// chrono format string for credential timestamps.
    pub datetime_format: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            token_delay_secs: 60,
            datetime_format: TokenAuthenticator::DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}
