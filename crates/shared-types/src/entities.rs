//! Shared identifiers and status enums.
//!
//! The Lift and Actor entities themselves live in `lift-sim`; only the
//! pieces that cross subsystem boundaries (ids, discrete floors, status
//! enums used in wire views) are defined here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable actor identifier, supplied by the client at authentication.
pub type ActorId = String;

/// Discrete building level. Floor 1 is the ground stop; lifts derive their
/// floor from a continuous position, so floor 0 is reachable while a car
/// sits at position 0.0.
pub type Floor = u32;

/// Lift car state.
///
/// ```text
/// [STOPPED] ──move toward action floor──→ [IN_ACTION]
///     ↑                                        │
///     └────── no action floor / arrived ───────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiftStatus {
    /// Parked at a floor, boarding or waiting for work.
    #[default]
    Stopped,
    /// Moving toward its action floor.
    InAction,
}

impl fmt::Display for LiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftStatus::Stopped => write!(f, "STOPPED"),
            LiftStatus::InAction => write!(f, "IN_ACTION"),
        }
    }
}

/// Actor travel state.
///
/// ```text
/// [IDLE] ──wait_lift──→ [EXPECT] ──enter_lift──→ [IN_LIFT]
///    ↑                     │                         │
///    │←──────idle──────────┘                         │
///    └────────────────leave_lift─────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorStatus {
    /// No travel intent.
    #[default]
    Idle,
    /// Waiting on a floor for a lift.
    Expect,
    /// Riding a lift toward `need_floor`.
    InLift,
}

impl fmt::Display for ActorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorStatus::Idle => write!(f, "IDLE"),
            ActorStatus::Expect => write!(f, "EXPECT"),
            ActorStatus::InLift => write!(f, "IN_LIFT"),
        }
    }
}
