//! Actor entity and its travel state machine.

use chrono::{DateTime, Utc};
use shared_types::{ActorId, ActorStatus, Floor};

/// A building occupant requesting vertical transport.
///
/// State machine:
///
/// ```text
/// [IDLE] ──wait_lift(floor)──→ [EXPECT] ──enter_lift──→ [IN_LIFT]
///    ↑                            │                         │
///    │←───────── idle ────────────┘                         │
///    └───────────────────── leave_lift ─────────────────────┘
/// ```
///
/// `need_floor` is `Some` exactly while the actor is EXPECT or IN_LIFT.
/// Fields are private so the invariant cannot be bypassed; the transition
/// methods are the only mutation surface.
#[derive(Debug, Clone)]
pub struct Actor {
    uid: ActorId,
    weight: f64,
    floor: Floor,
    need_floor: Option<Floor>,
    status: ActorStatus,
    timestamp: DateTime<Utc>,
}

impl Actor {
    /// Creates an idle actor on floor 1. Weight is fixed for the actor's
    /// lifetime.
    pub fn new(uid: impl Into<ActorId>, weight: f64) -> Self {
        Self {
            uid: uid.into(),
            weight,
            floor: 1,
            need_floor: None,
            status: ActorStatus::Idle,
            timestamp: Utc::now(),
        }
    }

    /// Stable identifier.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Body weight, set at registration.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Current discrete floor.
    pub fn floor(&self) -> Floor {
        self.floor
    }

    /// Destination floor while waiting or riding.
    pub fn need_floor(&self) -> Option<Floor> {
        self.need_floor
    }

    /// Current travel state.
    pub fn status(&self) -> ActorStatus {
        self.status
    }

    /// Registration time, informational.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Moves the actor to a floor. Values below 1 are ignored; the engine
    /// calls this while a car carries the actor between floors.
    pub fn set_floor(&mut self, floor: Floor) {
        if floor >= 1 {
            self.floor = floor;
        }
    }

    /// Requests transport to `floor`. No-op while riding, and no-op when
    /// the actor is already on the requested floor.
    pub fn wait_lift(&mut self, floor: Floor) {
        if self.status != ActorStatus::InLift && floor != self.floor {
            self.need_floor = Some(floor);
            self.status = ActorStatus::Expect;
        }
    }

    /// Cancels a pending request. Only a waiting actor can go idle; a ride
    /// in progress cannot be interrupted.
    pub fn idle(&mut self) {
        if self.status == ActorStatus::Expect {
            self.status = ActorStatus::Idle;
            self.need_floor = None;
        }
    }

    /// Boards a lift. Engine-invoked; succeeds only from EXPECT.
    pub fn enter_lift(&mut self) -> bool {
        if self.status == ActorStatus::Expect {
            self.status = ActorStatus::InLift;
            return true;
        }
        false
    }

    /// Leaves a lift at the current floor. Engine-invoked; succeeds only
    /// from IN_LIFT.
    pub fn leave_lift(&mut self) -> bool {
        if self.status == ActorStatus::InLift {
            self.status = ActorStatus::Idle;
            self.need_floor = None;
            return true;
        }
        false
    }
}
