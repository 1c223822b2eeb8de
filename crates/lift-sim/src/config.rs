//! Simulation configuration with validation.

use crate::error::SimConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Building and fleet parameters plus the tick cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of floors in the building. Informational: dispatch does not
    /// clamp to it, the loop only warns when a lift is sent above it.
    pub floor_count: u32,
    /// Height of one floor in position units.
    pub floor_height: f64,
    /// Number of lift cars, fixed for the process lifetime.
    pub lift_count: u32,
    /// Weight capacity per car.
    pub lift_max_weight: f64,
    /// Positional distance a car covers per tick.
    pub lift_speed: f64,
    /// Seconds between ticks. A slow tick delays the next one; there is
    /// no catch-up.
    pub loop_delay_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floor_count: 10,
            floor_height: 1.0,
            lift_count: 3,
            lift_max_weight: 300.0,
            lift_speed: 0.25,
            loop_delay_secs: 0.5,
        }
    }
}

impl SimConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.floor_count == 0 {
            return Err(SimConfigError::InvalidFloor(
                "floor_count cannot be 0".into(),
            ));
        }
        if self.floor_height <= 0.0 {
            return Err(SimConfigError::InvalidFloor(
                "floor_height must be positive".into(),
            ));
        }
        if self.lift_count == 0 {
            return Err(SimConfigError::InvalidLift("lift_count cannot be 0".into()));
        }
        if self.lift_max_weight <= 0.0 {
            return Err(SimConfigError::InvalidLift(
                "lift_max_weight must be positive".into(),
            ));
        }
        if self.lift_speed <= 0.0 {
            return Err(SimConfigError::InvalidLift(
                "lift_speed must be positive".into(),
            ));
        }
        if self.loop_delay_secs <= 0.0 {
            return Err(SimConfigError::InvalidDelay(
                "loop_delay_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Tick interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.loop_delay_secs)
    }
}
