//! Wire envelope for the persistent client channel.
//!
//! Every inbound message is a [`SignalRequest`]; the server answers with
//! [`ResponseFrame`]s (request/response, the optional `id` is echoed back)
//! and pushes [`NotifyFrame`]s for asynchronous state changes.

use crate::errors::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a client-supplied request id.
pub const MAX_REQUEST_ID_LEN: usize = 32;

/// Inbound message envelope: `{"signal": ..., "id": ..., "data": {...}}`.
///
/// `data` stays untyped here; the gateway parses it into a typed payload
/// once the signal name is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRequest {
    /// Signal name, e.g. `auth` or `actor_expect`.
    pub signal: String,
    /// Optional request id, echoed verbatim in the response.
    #[serde(default)]
    pub id: Option<String>,
    /// Per-signal payload.
    pub data: serde_json::Value,
}

impl SignalRequest {
    /// Parses and validates an envelope from raw message text.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let request: SignalRequest = serde_json::from_str(text)
            .map_err(|e| ProtocolError::Validation(format!("invalid envelope: {e}")))?;

        if let Some(id) = &request.id {
            if id.len() > MAX_REQUEST_ID_LEN {
                return Err(ProtocolError::Validation(format!(
                    "request id exceeds {MAX_REQUEST_ID_LEN} characters"
                )));
            }
        }

        Ok(request)
    }
}

/// Response outcome flag, serialized as `"ok"` / `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Request/response frame sent back to the requesting connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFrame {
    /// Frame discriminator, always `"response"`.
    #[serde(rename = "type")]
    pub frame_type: String,
    /// Echo of the request signal.
    pub signal: String,
    /// Echo of the request id.
    pub id: Option<String>,
    /// Outcome flag.
    pub status: ResponseStatus,
    /// Result payload, or an [`ErrorBody`] when `status` is `error`.
    pub data: serde_json::Value,
}

impl ResponseFrame {
    /// Builds a success response.
    pub fn ok(signal: &str, id: Option<String>, data: serde_json::Value) -> Self {
        Self {
            frame_type: "response".to_string(),
            signal: signal.to_string(),
            id,
            status: ResponseStatus::Ok,
            data,
        }
    }

    /// Builds an error response from a protocol error.
    pub fn error(signal: &str, id: Option<String>, error: &ProtocolError) -> Self {
        Self {
            frame_type: "response".to_string(),
            signal: signal.to_string(),
            id,
            status: ResponseStatus::Error,
            data: serde_json::json!(ErrorBody {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }

    /// Serializes the frame for the wire.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Error payload carried in an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Numeric error code (HTTP-like: 400, 401, 403, 404).
    pub code: u16,
    /// Human-readable message.
    pub message: String,
}

/// Asynchronous event pushed without a request id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyEvent {
    /// A new actor authenticated; sent to everyone but the arriving uid.
    ActorArrive,
    /// A lift dropped the receiving actor off at its floor.
    DropOff,
    /// A lift boarded the receiving actor.
    EnterLift,
}

impl fmt::Display for NotifyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyEvent::ActorArrive => write!(f, "actor_arrive"),
            NotifyEvent::DropOff => write!(f, "drop_off"),
            NotifyEvent::EnterLift => write!(f, "enter_lift"),
        }
    }
}

/// Push frame for asynchronous state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyFrame {
    /// Frame discriminator, always `"notify"`.
    #[serde(rename = "type")]
    pub frame_type: String,
    /// Event name.
    pub event: NotifyEvent,
    /// Event payload.
    pub data: serde_json::Value,
}

impl NotifyFrame {
    /// Builds a notify frame.
    pub fn new(event: NotifyEvent, data: serde_json::Value) -> Self {
        Self {
            frame_type: "notify".to_string(),
            event,
            data,
        }
    }

    /// Serializes the frame for the wire.
    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}
