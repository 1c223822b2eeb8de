//! Process-wide simulation state.
//!
//! One [`SimulationState`] owns the lift fleet and the actor registry for
//! the process lifetime. The tick task and every connection task share it
//! behind a single mutex; each tick and each signal handler holds the lock
//! for the duration of its one operation.

use crate::config::SimConfig;
use crate::domain::{dispatch, Actor, Lift};
use crate::events::SimEvent;
use parking_lot::Mutex;
use shared_types::{ActorId, Floor, LiftStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared handle to the simulation state.
pub type SharedSimulation = Arc<Mutex<SimulationState>>;

/// The lift fleet and the actor registry.
///
/// Lifts are created once at startup and never destroyed; actors are
/// created on first authentication and kept for the process lifetime.
/// The registry is ordered by uid so list truncation is deterministic.
pub struct SimulationState {
    config: SimConfig,
    lifts: Vec<Lift>,
    actors: BTreeMap<ActorId, Actor>,
}

impl SimulationState {
    /// Builds the fleet from configuration. Car ids are `lift_0` through
    /// `lift_{n-1}`.
    pub fn new(config: SimConfig) -> Self {
        let lifts = (0..config.lift_count)
            .map(|index| {
                Lift::new(
                    format!("lift_{index}"),
                    config.lift_speed,
                    config.lift_max_weight,
                    config.floor_height,
                )
            })
            .collect();

        Self {
            config,
            lifts,
            actors: BTreeMap::new(),
        }
    }

    /// Wraps the state for sharing between the tick task and connection
    /// tasks.
    pub fn into_shared(self) -> SharedSimulation {
        Arc::new(Mutex::new(self))
    }

    /// The fleet, in creation order.
    pub fn lifts(&self) -> &[Lift] {
        &self.lifts
    }

    /// Registered actors, in uid order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Looks up one actor.
    pub fn actor(&self, uid: &str) -> Option<&Actor> {
        self.actors.get(uid)
    }

    /// Mutable access to one actor, for signal handlers.
    pub fn actor_mut(&mut self, uid: &str) -> Option<&mut Actor> {
        self.actors.get_mut(uid)
    }

    /// Returns the actor for `uid`, creating an idle one on first sight.
    ///
    /// Registration is idempotent: a second authentication for a known uid
    /// returns the existing actor untouched, keeping its in-flight floor,
    /// status, and weight.
    pub fn register_actor(&mut self, uid: &str, weight: f64) -> &Actor {
        self.actors
            .entry(uid.to_string())
            .or_insert_with(|| {
                debug!(uid, weight, "registering new actor");
                Actor::new(uid, weight)
            })
    }

    /// Advances every lift by one tick, returning the resulting events in
    /// delivery order.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for index in 0..self.lifts.len() {
            self.step_lift(index, &mut events);
        }
        events
    }

    fn step_lift(&mut self, index: usize, events: &mut Vec<SimEvent>) {
        let near = dispatch::near_action_floor(&self.lifts[index], &self.actors);

        match self.lifts[index].status() {
            LiftStatus::InAction => {
                let floor = self.lifts[index].floor();

                // riders track the car between floors
                let riders = self.lifts[index].passengers().to_vec();
                for uid in &riders {
                    if let Some(actor) = self.actors.get_mut(uid) {
                        actor.set_floor(floor);
                    }
                }

                match near {
                    Some(target) if target != floor => self.move_toward(index, target),
                    _ => self.lifts[index].stop(),
                }
            }
            LiftStatus::Stopped => {
                let Some(target) = near else { return };
                let floor = self.lifts[index].floor();

                if target == floor {
                    // alighting always precedes boarding at a shared stop
                    let dropped = dispatch::drop_off(&mut self.lifts[index], &mut self.actors);
                    if !dropped.is_empty() {
                        events.push(SimEvent::DropOff {
                            lift_id: self.lifts[index].id().to_string(),
                            floor,
                            uids: dropped,
                        });
                    }

                    let boarded = dispatch::take_actors(&mut self.lifts[index], &mut self.actors);
                    if !boarded.is_empty() {
                        events.push(SimEvent::EnterLift {
                            lift_id: self.lifts[index].id().to_string(),
                            floor,
                            uids: boarded,
                        });
                    }

                    // the stop may have changed the picture: head straight
                    // for the next action floor in the same tick
                    if let Some(next) = dispatch::near_action_floor(&self.lifts[index], &self.actors)
                    {
                        if next != floor {
                            self.move_toward(index, next);
                        }
                    }
                } else {
                    self.move_toward(index, target);
                }
            }
        }
    }

    fn move_toward(&mut self, index: usize, target: Floor) {
        if target > self.config.floor_count {
            // nothing bounds dispatch to the building height; surface it
            warn!(
                lift_id = self.lifts[index].id(),
                target,
                floor_count = self.config.floor_count,
                "lift dispatched above configured floor count"
            );
        }
        self.lifts[index].step_toward(target);
    }
}
