//! The closed set of client signals and their typed payloads.
//!
//! Signal names map to a [`SignalKind`] first, so the authentication gate
//! can run before any payload field is looked at; only then is the payload
//! parsed into its typed form, failing with a validation error on
//! mismatch.

use serde::Deserialize;
use shared_types::{Floor, ProtocolError, ProtocolResult};

/// Default page size for the list signals.
const DEFAULT_LIST_COUNT: u32 = 10;

/// Recognized signal names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Auth,
    LiftList,
    ActorList,
    ActorIdle,
    ActorExpect,
}

impl SignalKind {
    /// Resolves a wire signal name; unknown names are a 404-class error.
    pub fn parse(name: &str) -> ProtocolResult<Self> {
        match name {
            "auth" => Ok(SignalKind::Auth),
            "lift_list" => Ok(SignalKind::LiftList),
            "actor_list" => Ok(SignalKind::ActorList),
            "actor_idle" => Ok(SignalKind::ActorIdle),
            "actor_expect" => Ok(SignalKind::ActorExpect),
            other => Err(ProtocolError::SignalNotFound(other.to_string())),
        }
    }

    /// Whether the signal requires an authenticated session. When it does
    /// and the connection has none, the payload is never evaluated.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, SignalKind::Auth)
    }
}

/// A fully parsed, validated signal.
#[derive(Debug, Clone)]
pub enum Signal {
    Auth(AuthPayload),
    LiftList(ListPayload),
    ActorList(ListPayload),
    ActorIdle,
    ActorExpect(ExpectPayload),
}

impl Signal {
    /// Parses the `data` object for a known signal kind.
    pub fn parse(kind: SignalKind, data: serde_json::Value) -> ProtocolResult<Self> {
        match kind {
            SignalKind::Auth => {
                let payload: AuthPayload = parse_payload(data)?;
                if payload.weight < 1.0 {
                    return Err(ProtocolError::Validation(
                        "weight must be at least 1.0".into(),
                    ));
                }
                Ok(Signal::Auth(payload))
            }
            SignalKind::LiftList => Ok(Signal::LiftList(parse_list_payload(data)?)),
            SignalKind::ActorList => Ok(Signal::ActorList(parse_list_payload(data)?)),
            SignalKind::ActorIdle => Ok(Signal::ActorIdle),
            SignalKind::ActorExpect => {
                let payload: ExpectPayload = parse_payload(data)?;
                if payload.floor < 1 {
                    return Err(ProtocolError::Validation("floor must be at least 1".into()));
                }
                Ok(Signal::ActorExpect(payload))
            }
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(data: serde_json::Value) -> ProtocolResult<T> {
    serde_json::from_value(data)
        .map_err(|e| ProtocolError::Validation(format!("invalid payload: {e}")))
}

fn parse_list_payload(data: serde_json::Value) -> ProtocolResult<ListPayload> {
    let payload: ListPayload = parse_payload(data)?;
    if payload.count < 1 {
        return Err(ProtocolError::Validation("count must be at least 1".into()));
    }
    Ok(payload)
}

/// `auth` payload: the client credential.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub uid: String,
    /// ISO-8601 timestamp string, also the token's signed message part.
    pub timestamp: String,
    /// Hex keyed-hash signature over `uid + timestamp`.
    pub token: String,
    pub weight: f64,
}

/// `lift_list` / `actor_list` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPayload {
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    DEFAULT_LIST_COUNT
}

/// `actor_expect` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectPayload {
    pub floor: Floor,
}
