//! The periodic simulation driver.
//!
//! One background task steps the whole fleet once per tick and pushes the
//! resulting events through the outbound sink. The tick interval is a
//! fixed delay: a slow tick simply delays the next one.

use crate::events::SimEvent;
use crate::ports::EventSink;
use crate::state::SharedSimulation;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Owns the tick task for the process lifetime.
pub struct SimulationService {
    state: SharedSimulation,
    sink: Arc<dyn EventSink>,
    tick_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SimulationService {
    /// Creates the service. Nothing runs until [`start`](Self::start).
    pub fn new(state: SharedSimulation, sink: Arc<dyn EventSink>, tick_interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            state,
            sink,
            tick_interval,
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    /// Spawns the tick loop.
    ///
    /// Each iteration holds the simulation lock for exactly one `step()`
    /// and publishes the collected events after releasing it, so signal
    /// handlers never wait on event delivery.
    pub fn start(&self) {
        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);
        let tick_interval = self.tick_interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        info!(
            tick_interval_ms = tick_interval.as_millis() as u64,
            "[sim] simulation loop starting"
        );

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(tick_interval) => {}
                    _ = shutdown_rx.changed() => {
                        info!("[sim] simulation loop stopped");
                        return;
                    }
                }

                let events: Vec<SimEvent> = state.lock().step();

                if !events.is_empty() {
                    debug!(count = events.len(), "[sim] tick produced events");
                }
                for event in events {
                    sink.publish(event).await;
                }
            }
        });

        *self.handle.lock().unwrap_or_else(|e| e.into_inner()) = Some(task);
    }

    /// Signals the tick loop to stop and detaches from it.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self
            .handle
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            handle.abort();
        }
    }
}

impl Drop for SimulationService {
    fn drop(&mut self) {
        self.stop();
    }
}
