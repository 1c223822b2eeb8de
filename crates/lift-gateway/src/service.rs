//! Gateway service: router assembly and the serve loop.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::notifier::SessionNotifier;
use crate::router::AppState;
use crate::ws;
use axum::routing::get;
use axum::Router;
use lift_sim::SharedSimulation;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// The client-facing WebSocket server.
pub struct GatewayService {
    config: GatewayConfig,
    state: AppState,
}

impl GatewayService {
    /// Validates the configuration and assembles the shared state.
    pub fn new(config: GatewayConfig, sim: SharedSimulation) -> Result<Self, GatewayError> {
        config.validate()?;
        let state = AppState::new(&config, sim);
        Ok(Self { config, state })
    }

    /// Shared per-process state (sessions, authenticator, simulation).
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Event sink the simulation loop publishes into.
    pub fn notifier(&self) -> Arc<SessionNotifier> {
        Arc::new(SessionNotifier::new(Arc::clone(&self.state.sessions)))
    }

    /// Binds the listener and serves until `shutdown` resolves.
    pub async fn serve<F>(&self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Router::new()
            .route("/ws", get(ws::ws_route))
            .with_state(self.state.clone());

        let addr = self.config.addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        info!(%addr, "[gateway] listening for client connections");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))
    }
}
