//! WebSocket connection handling.
//!
//! Each accepted socket gets a connection id, an entry in the session
//! registry, and a writer task draining its outbound channel. The read
//! loop feeds text frames to the router; when the router demands a close,
//! the loop breaks and the writer flushes whatever is queued (the error
//! frame included) before the socket shuts.

use crate::router::{self, AppState};
use crate::session::ConnectionId;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use shared_types::{ProtocolError, ResponseFrame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Upgrade handler for the `/ws` route.
pub async fn ws_route(
    State(state): State<AppState>,
    upgrade: WebSocketUpgrade,
) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Runs one client connection to completion.
pub async fn handle_socket(state: AppState, socket: WebSocket) {
    let connection_id = ConnectionId::new();
    info!(connection_id = %connection_id, "new client connection");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<String>();
    state.sessions.register(connection_id, frame_tx);

    // Writer: drains queued frames, then closes the socket. Ends when the
    // session entry (and with it the sender) is dropped.
    let writer = tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            if ws_tx.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                if reject_oversized(&state, connection_id, text.len()) {
                    continue;
                }
                if router::handle_message(&state, connection_id, &text).await {
                    break;
                }
            }
            Ok(Message::Binary(data)) => {
                if reject_oversized(&state, connection_id, data.len()) {
                    continue;
                }
                match String::from_utf8(data) {
                    Ok(text) => {
                        if router::handle_message(&state, connection_id, &text).await {
                            break;
                        }
                    }
                    Err(_) => {
                        let error = ProtocolError::Validation("frame is not UTF-8".into());
                        let frame = ResponseFrame::error("invalid", None, &error);
                        state.sessions.send(connection_id, &frame.to_text());
                    }
                }
            }
            // Protocol-level pings are answered by the transport.
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
            Ok(Message::Close(_)) => {
                debug!(connection_id = %connection_id, "close frame received");
                break;
            }
            Err(error) => {
                warn!(connection_id = %connection_id, %error, "socket error");
                break;
            }
        }
    }

    // Drop the session entry first so the writer's channel closes and the
    // remaining frames flush.
    state.sessions.remove(connection_id);
    let _ = writer.await;

    info!(connection_id = %connection_id, "client connection closed");
}

fn reject_oversized(state: &AppState, connection_id: ConnectionId, size: usize) -> bool {
    if size <= state.max_message_size {
        return false;
    }
    warn!(
        connection_id = %connection_id,
        size,
        max = state.max_message_size,
        "frame exceeds size limit"
    );
    let error = ProtocolError::Validation(format!(
        "frame too large: {size} bytes (max {})",
        state.max_message_size
    ));
    let frame = ResponseFrame::error("invalid", None, &error);
    state.sessions.send(connection_id, &frame.to_text());
    true
}
