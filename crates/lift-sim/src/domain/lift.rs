//! Lift entity: continuous position, derived floor, passenger roster.

use shared_types::{ActorId, Floor, LiftStatus};

/// Starting position for a fresh car; just above ground so the derived
/// floor reads 1.
const INITIAL_POSITION: f64 = 0.01;

/// An elevator car.
///
/// Position is a continuous coordinate clamped at 0; the discrete floor is
/// always derived as `ceil(position / floor_height)` and never stored.
/// The passenger roster holds actor ids; weights live on the actors, and
/// the dispatch engine enforces the capacity bound on every admission.
#[derive(Debug, Clone)]
pub struct Lift {
    id: String,
    speed: f64,
    max_weight: f64,
    position: f64,
    floor_height: f64,
    passengers: Vec<ActorId>,
    status: LiftStatus,
}

impl Lift {
    /// Creates a stopped car at the ground stop.
    pub fn new(id: impl Into<String>, speed: f64, max_weight: f64, floor_height: f64) -> Self {
        Self {
            id: id.into(),
            speed,
            max_weight,
            position: INITIAL_POSITION,
            floor_height,
            passengers: Vec::new(),
            status: LiftStatus::Stopped,
        }
    }

    /// Immutable car identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Positional distance covered per tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Weight capacity.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Continuous position, ≥ 0.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current discrete floor, derived from position.
    pub fn floor(&self) -> Floor {
        (self.position / self.floor_height).ceil() as Floor
    }

    /// Riders currently aboard.
    pub fn passengers(&self) -> &[ActorId] {
        &self.passengers
    }

    /// Whether the car carries nobody.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Car state.
    pub fn status(&self) -> LiftStatus {
        self.status
    }

    /// Parks the car to board or wait for work.
    pub fn stop(&mut self) {
        self.status = LiftStatus::Stopped;
    }

    /// Moves one tick step toward `target`. Marks the car IN_ACTION even
    /// when the step overshoots; the next tick stops it at the floor.
    pub fn step_toward(&mut self, target: Floor) {
        if target < self.floor() {
            self.move_down();
        } else {
            self.move_up();
        }
    }

    fn move_up(&mut self) {
        self.status = LiftStatus::InAction;
        self.position += self.speed;
    }

    fn move_down(&mut self) {
        self.status = LiftStatus::InAction;
        self.position -= self.speed;

        // a car can never go below ground
        if self.position < 0.0 {
            self.position = 0.0;
        }
    }

    /// Adds a rider to the roster. Capacity is the dispatch engine's
    /// responsibility; the roster itself only tracks membership.
    pub(crate) fn board(&mut self, uid: ActorId) {
        self.passengers.push(uid);
    }

    /// Removes a rider from the roster.
    pub(crate) fn unboard(&mut self, uid: &str) {
        self.passengers.retain(|p| p != uid);
    }
}
