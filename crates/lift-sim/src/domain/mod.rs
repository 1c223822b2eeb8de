//! Simulation domain: entities, dispatch decisions, and wire views.

pub mod actor;
pub mod dispatch;
pub mod lift;
pub mod views;

pub use actor::Actor;
pub use lift::Lift;
pub use views::{ActorView, LiftView};
