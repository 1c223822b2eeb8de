//! # Shared Types Crate
//!
//! Cross-subsystem types for the microlift service: the wire envelope used
//! on every client connection, the protocol error taxonomy, and the status
//! enums shared between the simulation and the gateway.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a crate boundary
//!   lives here.
//! - **Closed protocol surface**: signals, events, and error codes are
//!   enumerated types, never stringly-typed maps.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::{ActorId, ActorStatus, Floor, LiftStatus};
pub use envelope::{
    ErrorBody, NotifyEvent, NotifyFrame, ResponseFrame, ResponseStatus, SignalRequest,
};
pub use errors::{ProtocolError, ProtocolResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
