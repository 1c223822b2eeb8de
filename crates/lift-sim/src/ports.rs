//! Outbound ports.
//!
//! The simulation publishes everything observable through these traits;
//! adapters elsewhere (the gateway) decide how events reach clients.

use crate::events::SimEvent;
use async_trait::async_trait;

/// Sink for per-tick simulation events.
///
/// Delivery is best-effort by contract: implementations must never fail
/// the tick, and an event for an actor with no live connections is simply
/// dropped.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers one event to the affected actors.
    async fn publish(&self, event: SimEvent);
}

/// Sink that discards every event. Useful for tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

#[async_trait]
impl EventSink for NullEventSink {
    async fn publish(&self, _event: SimEvent) {}
}
