//! Adapter from simulation events to notify frames.

use crate::session::SessionManager;
use async_trait::async_trait;
use lift_sim::{EventSink, SimEvent};
use shared_types::{NotifyEvent, NotifyFrame};
use std::sync::Arc;

/// Delivers tick events to the affected actors' connections.
pub struct SessionNotifier {
    sessions: Arc<SessionManager>,
}

impl SessionNotifier {
    /// Wraps the session registry as a simulation event sink.
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl EventSink for SessionNotifier {
    async fn publish(&self, event: SimEvent) {
        let (notify_event, lift_id, floor, uids) = match &event {
            SimEvent::DropOff {
                lift_id,
                floor,
                uids,
            } => (NotifyEvent::DropOff, lift_id, floor, uids),
            SimEvent::EnterLift {
                lift_id,
                floor,
                uids,
            } => (NotifyEvent::EnterLift, lift_id, floor, uids),
        };

        let frame = NotifyFrame::new(
            notify_event,
            serde_json::json!({ "id": lift_id, "floor": floor }),
        )
        .to_text();

        // Independent best-effort sends: one dead connection never blocks
        // the rest of the stop's notifications.
        for uid in uids {
            self.sessions.send_to_uid(uid, &frame);
        }
    }
}
