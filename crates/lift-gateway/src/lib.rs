//! Lift Gateway - the client-facing edge of the simulation.
//!
//! Exposes the building over a persistent WebSocket channel: a
//! per-connection protocol router, the session registry that maps
//! connections to authenticated actors, and the notify fan-out for
//! simulation events.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       lift-gateway                         │
//! ├────────────────────────────────────────────────────────────┤
//! │  ws.rs        accept → register connection → read loop     │
//! │  router.rs    envelope parse → auth gate → typed dispatch  │
//! │  handlers.rs  auth / lift_list / actor_list /              │
//! │               actor_idle / actor_expect                    │
//! │  session.rs   connection ↔ actor bindings, best-effort     │
//! │               delivery, broadcast                          │
//! │  notifier.rs  lift-sim EventSink → notify frames           │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure on a connection is reported as exactly one error frame;
//! only a rejected credential signature or an unhandled handler failure
//! closes the connection.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod router;
pub mod service;
pub mod session;
pub mod signal;
pub mod ws;

pub use config::{AuthConfig, GatewayConfig};
pub use error::GatewayError;
pub use notifier::SessionNotifier;
pub use router::AppState;
pub use service::GatewayService;
pub use session::{ConnectionId, SessionManager};
pub use signal::{Signal, SignalKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
