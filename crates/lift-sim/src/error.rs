//! Simulation configuration errors.

use thiserror::Error;

/// Rejected simulation configuration.
#[derive(Debug, Clone, Error)]
pub enum SimConfigError {
    /// Invalid floor geometry.
    #[error("invalid floor configuration: {0}")]
    InvalidFloor(String),

    /// Invalid fleet parameters.
    #[error("invalid lift configuration: {0}")]
    InvalidLift(String),

    /// Invalid tick cadence.
    #[error("invalid loop delay: {0}")]
    InvalidDelay(String),
}
