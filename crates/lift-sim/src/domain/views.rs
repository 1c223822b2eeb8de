//! Wire serialization views of the simulation entities.
//!
//! Views carry only the observable fields and round-trip through JSON; the
//! entities themselves never touch the wire.

use crate::domain::{Actor, Lift};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ActorId, ActorStatus, Floor, LiftStatus};

/// Serialized lift state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftView {
    pub id: String,
    pub speed: f64,
    pub max_weight: f64,
    pub position: f64,
    pub passengers: Vec<ActorId>,
    pub status: LiftStatus,
}

impl From<&Lift> for LiftView {
    fn from(lift: &Lift) -> Self {
        Self {
            id: lift.id().to_string(),
            speed: lift.speed(),
            max_weight: lift.max_weight(),
            position: lift.position(),
            passengers: lift.passengers().to_vec(),
            status: lift.status(),
        }
    }
}

/// Serialized actor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub uid: ActorId,
    pub weight: f64,
    pub floor: Floor,
    pub need_floor: Option<Floor>,
    pub status: ActorStatus,
    pub timestamp: DateTime<Utc>,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            uid: actor.uid().to_string(),
            weight: actor.weight(),
            floor: actor.floor(),
            need_floor: actor.need_floor(),
            status: actor.status(),
            timestamp: actor.timestamp(),
        }
    }
}
