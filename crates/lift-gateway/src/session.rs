//! Connection and session registry.
//!
//! Tracks every open connection's outbound channel, the connection ↔
//! actor binding established by `auth`, and the inverse uid → connections
//! map used for targeted and broadcast delivery. An actor may hold several
//! concurrent connections; closing one never touches the actor itself.

use dashmap::DashMap;
use shared_types::ActorId;
use std::collections::HashSet;
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Unique id for one client connection (UUID v7, time-ordered for log
/// correlation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound frame channel for one connection. Frames are serialized wire
/// text; the per-socket writer task drains the receiver.
pub type FrameSender = mpsc::UnboundedSender<String>;

/// Live connection and session state.
///
/// Every delivery is best-effort: a send to a dead or missing receiver is
/// silently dropped and never fails the caller, so one broken connection
/// cannot stall a broadcast or a tick.
pub struct SessionManager {
    /// Outbound channels for all open connections, authenticated or not.
    connections: DashMap<ConnectionId, FrameSender>,
    /// Connection → authenticated actor.
    by_connection: DashMap<ConnectionId, ActorId>,
    /// Actor → set of live connections.
    by_uid: DashMap<ActorId, HashSet<ConnectionId>>,
}

impl SessionManager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            by_connection: DashMap::new(),
            by_uid: DashMap::new(),
        }
    }

    /// Registers a freshly accepted connection with its outbound channel.
    pub fn register(&self, connection_id: ConnectionId, sender: FrameSender) {
        self.connections.insert(connection_id, sender);
    }

    /// The actor this connection authenticated as, if any.
    pub fn uid_of(&self, connection_id: ConnectionId) -> Option<ActorId> {
        self.by_connection
            .get(&connection_id)
            .map(|entry| entry.clone())
    }

    /// Binds a connection to an actor after successful authentication.
    ///
    /// Re-binding an already authenticated connection to a different uid
    /// detaches it from the previous actor's connection set first.
    pub fn bind(&self, connection_id: ConnectionId, uid: &str) {
        if let Some(previous) = self.by_connection.insert(connection_id, uid.to_string()) {
            if previous != uid {
                self.detach_from_uid(&previous, connection_id);
            }
        }
        self.by_uid
            .entry(uid.to_string())
            .or_default()
            .insert(connection_id);

        debug!(connection_id = %connection_id, uid, "session bound");
    }

    /// Sends one frame to one connection, best-effort.
    pub fn send(&self, connection_id: ConnectionId, frame: &str) {
        if let Some(sender) = self.connections.get(&connection_id) {
            let _ = sender.send(frame.to_string());
        }
    }

    /// Sends one frame to every live connection of an actor. An actor
    /// with no connections receives nothing; frames are not queued.
    pub fn send_to_uid(&self, uid: &str, frame: &str) {
        if let Some(conns) = self.by_uid.get(uid) {
            for connection_id in conns.iter() {
                self.send(*connection_id, frame);
            }
        }
    }

    /// Sends one frame to every authenticated actor except `exclude`.
    pub fn broadcast(&self, frame: &str, exclude: Option<&str>) {
        for entry in self.by_uid.iter() {
            if exclude.is_some_and(|uid| uid == entry.key().as_str()) {
                continue;
            }
            for connection_id in entry.value().iter() {
                self.send(*connection_id, frame);
            }
        }
    }

    /// Removes a closed connection and its session binding. The actor
    /// itself is untouched; one mid-ride stays in its lift.
    pub fn remove(&self, connection_id: ConnectionId) {
        self.connections.remove(&connection_id);
        if let Some((_, uid)) = self.by_connection.remove(&connection_id) {
            self.detach_from_uid(&uid, connection_id);
            debug!(connection_id = %connection_id, uid = %uid, "session removed");
        }
    }

    /// Number of open connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of actors with at least one live connection.
    pub fn session_count(&self) -> usize {
        self.by_uid.len()
    }

    fn detach_from_uid(&self, uid: &str, connection_id: ConnectionId) {
        if let Some(mut conns) = self.by_uid.get_mut(uid) {
            conns.remove(&connection_id);
        }
        self.by_uid.remove_if(uid, |_, conns| conns.is_empty());
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
