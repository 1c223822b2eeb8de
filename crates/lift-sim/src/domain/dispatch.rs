//! Dispatch decisions for a single car.
//!
//! Pure with respect to I/O: every function here reads one lift and the
//! actor registry and either returns a decision or applies the boarding /
//! alighting transitions that follow from it.

use crate::domain::{Actor, Lift};
use shared_types::{ActorId, ActorStatus, Floor};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Weight currently aboard the car.
pub fn onboard_weight(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> f64 {
    lift.passengers()
        .iter()
        .filter_map(|uid| actors.get(uid))
        .map(Actor::weight)
        .sum()
}

/// Capacity left before the car would be full.
pub fn remaining_capacity(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> f64 {
    lift.max_weight() - onboard_weight(lift, actors)
}

/// Nearest floor where a passenger wants out.
fn near_drop_floor(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> Option<Floor> {
    let current = lift.floor();
    lift.passengers()
        .iter()
        .filter_map(|uid| actors.get(uid))
        .filter_map(Actor::need_floor)
        .min_by_key(|floor| floor.abs_diff(current))
}

/// Nearest floor with a waiting actor the car could still take aboard.
///
/// Strictly under the remaining capacity, like admission itself: a car is
/// never sent to a floor whose only candidate could not board anyway.
fn near_take_floor(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> Option<Floor> {
    let current = lift.floor();
    let capacity = remaining_capacity(lift, actors);
    actors
        .values()
        .filter(|actor| actor.status() == ActorStatus::Expect && actor.weight() < capacity)
        .map(Actor::floor)
        .min_by_key(|floor| floor.abs_diff(current))
}

/// The single nearest floor requiring some action from this car, or `None`
/// when nobody needs it.
///
/// When a drop-off floor and a pickup floor are equidistant the drop-off
/// wins: unloading frees capacity, so it always outranks admitting new
/// riders at the same distance.
pub fn near_action_floor(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> Option<Floor> {
    let current = lift.floor();
    match (near_drop_floor(lift, actors), near_take_floor(lift, actors)) {
        (Some(drop), Some(take)) => {
            if drop.abs_diff(current) <= take.abs_diff(current) {
                Some(drop)
            } else {
                Some(take)
            }
        }
        (drop, take) => drop.or(take),
    }
}

/// Waiting actors on the car's floor that fit aboard, lightest first.
///
/// Admission is greedy by ascending weight, which maximizes the number of
/// riders taken per stop. The running total must stay strictly under the
/// capacity; the first candidate that would reach it halts admission for
/// the whole stop, even if a later (heavier) candidate could never fit
/// anyway.
pub fn select_boarders(lift: &Lift, actors: &BTreeMap<ActorId, Actor>) -> Vec<ActorId> {
    let floor = lift.floor();
    let mut candidates: Vec<&Actor> = actors
        .values()
        .filter(|actor| actor.status() == ActorStatus::Expect && actor.floor() == floor)
        .collect();
    candidates.sort_by(|a, b| {
        a.weight()
            .partial_cmp(&b.weight())
            .unwrap_or(Ordering::Equal)
    });

    let onboard = onboard_weight(lift, actors);
    let mut admitted = 0.0;
    let mut boarders = Vec::new();
    for candidate in candidates {
        if onboard + admitted + candidate.weight() >= lift.max_weight() {
            break;
        }
        admitted += candidate.weight();
        boarders.push(candidate.uid().to_string());
    }

    boarders
}

/// Lets out every passenger whose destination is the car's current floor.
/// Returns the alighting uids for notification.
pub fn drop_off(lift: &mut Lift, actors: &mut BTreeMap<ActorId, Actor>) -> Vec<ActorId> {
    let floor = lift.floor();
    let leaving: Vec<ActorId> = lift
        .passengers()
        .iter()
        .filter(|uid| {
            actors
                .get(*uid)
                .is_some_and(|actor| actor.need_floor() == Some(floor))
        })
        .cloned()
        .collect();

    for uid in &leaving {
        lift.unboard(uid);
        if let Some(actor) = actors.get_mut(uid) {
            actor.leave_lift();
        }
    }

    leaving
}

/// Boards the admitted waiting actors from the car's floor. Returns the
/// boarding uids for notification.
pub fn take_actors(lift: &mut Lift, actors: &mut BTreeMap<ActorId, Actor>) -> Vec<ActorId> {
    let boarders = select_boarders(lift, actors);

    for uid in &boarders {
        if let Some(actor) = actors.get_mut(uid) {
            if actor.enter_lift() {
                lift.board(uid.clone());
            }
        }
    }

    boarders
}
