//! Signal handlers.
//!
//! Each handler holds the simulation lock for one operation, returns the
//! success payload for the response frame, and reports failures through
//! the protocol error taxonomy.

use crate::router::AppState;
use crate::session::ConnectionId;
use crate::signal::{AuthPayload, ExpectPayload, ListPayload};
use lift_sim::{ActorView, LiftView};
use shared_auth::AuthError;
use shared_types::{NotifyEvent, NotifyFrame, ProtocolError, ProtocolResult};
use tracing::info;

/// `auth`: validates the credential, registers the actor (idempotent),
/// binds the session, and announces the arrival to everyone else.
pub async fn auth(
    state: &AppState,
    connection_id: ConnectionId,
    payload: AuthPayload,
) -> ProtocolResult<serde_json::Value> {
    state
        .auth
        .authenticate(&payload.uid, &payload.timestamp, &payload.token)
        .map_err(|error| match error {
            AuthError::MalformedTimestamp(message) => {
                ProtocolError::Validation(format!("invalid timestamp: {message}"))
            }
            AuthError::Expired => ProtocolError::TokenExpired,
            AuthError::Forbidden => ProtocolError::Forbidden,
        })?;

    let view = {
        let mut sim = state.sim.lock();
        ActorView::from(sim.register_actor(&payload.uid, payload.weight))
    };

    state.sessions.bind(connection_id, &payload.uid);
    info!(uid = %payload.uid, connection_id = %connection_id, "actor authenticated");

    // Announce the arrival to everyone but the arriving actor, before the
    // response goes back to the requester.
    let data = to_value(&view)?;
    let notify = NotifyFrame::new(NotifyEvent::ActorArrive, data.clone());
    state
        .sessions
        .broadcast(&notify.to_text(), Some(&payload.uid));

    Ok(data)
}

/// `lift_list`: the first `count` cars of the fleet.
pub fn lift_list(state: &AppState, payload: ListPayload) -> ProtocolResult<serde_json::Value> {
    let sim = state.sim.lock();
    let lifts: Vec<LiftView> = sim
        .lifts()
        .iter()
        .take(payload.count as usize)
        .map(LiftView::from)
        .collect();
    to_value(&lifts)
}

/// `actor_list`: the first `count` registered actors, in uid order.
pub fn actor_list(state: &AppState, payload: ListPayload) -> ProtocolResult<serde_json::Value> {
    let sim = state.sim.lock();
    let actors: Vec<ActorView> = sim
        .actors()
        .take(payload.count as usize)
        .map(ActorView::from)
        .collect();
    to_value(&actors)
}

/// `actor_idle`: cancels a pending request. Only a waiting actor changes
/// state; the response always carries the current view.
pub fn actor_idle(state: &AppState, uid: &str) -> ProtocolResult<serde_json::Value> {
    let mut sim = state.sim.lock();
    let actor = sim
        .actor_mut(uid)
        .ok_or_else(|| ProtocolError::Unhandled(format!("no actor registered for uid {uid}")))?;
    actor.idle();
    to_value(&ActorView::from(&*actor))
}

/// `actor_expect`: requests transport to a floor. A ride in progress and
/// a request for the current floor are both no-ops; the response always
/// carries the current view.
pub fn actor_expect(
    state: &AppState,
    uid: &str,
    payload: ExpectPayload,
) -> ProtocolResult<serde_json::Value> {
    let mut sim = state.sim.lock();
    let actor = sim
        .actor_mut(uid)
        .ok_or_else(|| ProtocolError::Unhandled(format!("no actor registered for uid {uid}")))?;
    actor.wait_lift(payload.floor);
    to_value(&ActorView::from(&*actor))
}

fn to_value<T: serde::Serialize>(value: &T) -> ProtocolResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ProtocolError::Unhandled(e.to_string()))
}
