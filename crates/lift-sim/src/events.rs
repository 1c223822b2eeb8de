//! Outbound simulation events.
//!
//! One tick produces an ordered list of these; for a single stop the
//! drop-off event always precedes the boarding event.

use shared_types::{ActorId, Floor};

/// A state change the gateway must fan out to affected actors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A car let these riders out at `floor`.
    DropOff {
        lift_id: String,
        floor: Floor,
        uids: Vec<ActorId>,
    },
    /// A car took these waiting actors aboard at `floor`.
    EnterLift {
        lift_id: String,
        floor: Floor,
        uids: Vec<ActorId>,
    },
}

impl SimEvent {
    /// Actors this event must be delivered to.
    pub fn recipients(&self) -> &[ActorId] {
        match self {
            SimEvent::DropOff { uids, .. } | SimEvent::EnterLift { uids, .. } => uids,
        }
    }
}
