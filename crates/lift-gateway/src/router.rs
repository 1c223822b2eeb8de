//! Per-connection protocol router.
//!
//! Order of checks mirrors the observable contract: envelope validation,
//! signal lookup, authentication gate, payload validation, handler. Every
//! failure becomes exactly one error frame; the return value tells the
//! socket loop whether to close the connection afterwards.

use crate::handlers;
use crate::session::{ConnectionId, SessionManager};
use crate::signal::{Signal, SignalKind};
use lift_sim::SharedSimulation;
use shared_auth::TokenAuthenticator;
use shared_types::{ProtocolError, ProtocolResult, ResponseFrame, SignalRequest};
use std::sync::Arc;
use tracing::debug;

/// Signal name echoed when the envelope itself could not be parsed.
const INVALID_SIGNAL: &str = "invalid";

/// Shared state handed to every connection task.
#[derive(Clone)]
pub struct AppState {
    pub sim: SharedSimulation,
    pub sessions: Arc<SessionManager>,
    pub auth: Arc<TokenAuthenticator>,
    pub max_message_size: usize,
}

impl AppState {
    /// Builds the per-process state from configuration and the shared
    /// simulation handle.
    pub fn new(config: &crate::config::GatewayConfig, sim: SharedSimulation) -> Self {
        Self {
            sim,
            sessions: Arc::new(SessionManager::new()),
            auth: Arc::new(config.authenticator()),
            max_message_size: config.max_message_size,
        }
    }
}

/// Handles one inbound text frame. Returns `true` when the connection
/// must be closed after the queued frames flush.
pub async fn handle_message(state: &AppState, connection_id: ConnectionId, text: &str) -> bool {
    let request = match SignalRequest::parse(text) {
        Ok(request) => request,
        Err(error) => {
            let frame = ResponseFrame::error(INVALID_SIGNAL, recover_id(text), &error);
            state.sessions.send(connection_id, &frame.to_text());
            return error.closes_connection();
        }
    };

    let signal_name = request.signal.clone();
    let request_id = request.id.clone();

    match dispatch(state, connection_id, request).await {
        Ok(data) => {
            let frame = ResponseFrame::ok(&signal_name, request_id, data);
            state.sessions.send(connection_id, &frame.to_text());
            false
        }
        Err(error) => {
            debug!(
                connection_id = %connection_id,
                signal = %signal_name,
                code = error.code(),
                %error,
                "signal rejected"
            );
            let frame = ResponseFrame::error(&signal_name, request_id, &error);
            state.sessions.send(connection_id, &frame.to_text());
            error.closes_connection()
        }
    }
}

async fn dispatch(
    state: &AppState,
    connection_id: ConnectionId,
    request: SignalRequest,
) -> ProtocolResult<serde_json::Value> {
    let kind = SignalKind::parse(&request.signal)?;

    // The gate runs before the payload is evaluated at all.
    let uid = state.sessions.uid_of(connection_id);
    if kind.requires_auth() && uid.is_none() {
        return Err(ProtocolError::AuthRequired);
    }

    match (Signal::parse(kind, request.data)?, uid) {
        (Signal::Auth(payload), _) => handlers::auth(state, connection_id, payload).await,
        (Signal::LiftList(payload), _) => handlers::lift_list(state, payload),
        (Signal::ActorList(payload), _) => handlers::actor_list(state, payload),
        (Signal::ActorIdle, Some(uid)) => handlers::actor_idle(state, &uid),
        (Signal::ActorExpect(payload), Some(uid)) => handlers::actor_expect(state, &uid, payload),
        // unreachable behind the gate, but the gate stays the only
        // authority either way
        (Signal::ActorIdle | Signal::ActorExpect(_), None) => Err(ProtocolError::AuthRequired),
    }
}

/// Best-effort request id recovery from a malformed envelope, so the error
/// frame can still correlate when the client sent valid JSON with an
/// invalid shape.
fn recover_id(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let id = value.get("id")?.as_str()?;
    if id.len() <= shared_types::envelope::MAX_REQUEST_ID_LEN {
        Some(id.to_string())
    } else {
        None
    }
}
