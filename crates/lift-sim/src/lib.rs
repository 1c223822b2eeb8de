//! Lift Simulation - dispatch engine and tick loop.
//!
//! This crate owns the building simulation: the Lift and Actor entities,
//! the greedy nearest-action-floor dispatch algorithm with capacity-bounded
//! admission, the process-wide [`SimulationState`], and the periodic
//! [`SimulationService`] that steps every lift once per tick.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       lift-sim                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  domain/          Lift + Actor state machines,           │
//! │                   pure dispatch decisions, wire views    │
//! │  state.rs         SimulationState (fleet + registry)     │
//! │  service.rs       tick task: lock → step → publish       │
//! │  ports.rs         EventSink (outbound port)              │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ SimEvent
//!                             ▼
//!                   gateway notify fan-out
//! ```
//!
//! The simulation performs no I/O: everything observable leaves through
//! the [`EventSink`] port, implemented by the gateway.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;

pub use config::SimConfig;
pub use domain::{Actor, ActorView, Lift, LiftView};
pub use error::SimConfigError;
pub use events::SimEvent;
pub use ports::EventSink;
pub use service::SimulationService;
pub use state::{SharedSimulation, SimulationState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
