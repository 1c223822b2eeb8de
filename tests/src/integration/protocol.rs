//! # Protocol Integration Tests
//!
//! Drives the gateway router over registered in-memory connections: each
//! fake client is a connection id plus the receiving end of its outbound
//! frame channel, exactly what the socket writer task would drain.
//!
//! ## Covered Contract
//!
//! 1. **Authentication**: success, foreign-uid signature (terminal),
//!    expired token (recoverable), idempotent re-auth
//! 2. **Gating**: every non-auth signal requires a session, payloads are
//!    not evaluated before the gate
//! 3. **Error taxonomy**: 400 / 401 / 403 / 404 with the documented
//!    close-or-stay-open behavior
//! 4. **Fan-out**: `actor_arrive` reaches everyone but the arriving uid

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lift_gateway::router::{handle_message, AppState};
    use lift_gateway::session::ConnectionId;
    use lift_gateway::{AuthConfig, GatewayConfig};
    use lift_sim::{SimConfig, SimulationState};
    use serde_json::{json, Value};
    use shared_auth::TokenAuthenticator;
    use tokio::sync::mpsc::UnboundedReceiver;

    const SECRET: &str = "integration-secret";

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn app_state() -> AppState {
        let config = GatewayConfig {
            auth: AuthConfig {
                secret_key: SECRET.into(),
                ..AuthConfig::default()
            },
            ..GatewayConfig::default()
        };
        let sim = SimulationState::new(SimConfig {
            lift_count: 3,
            lift_speed: 1.0,
            ..SimConfig::default()
        })
        .into_shared();
        AppState::new(&config, sim)
    }

    /// Registers a fake connection and returns its frame receiver.
    fn connect(state: &AppState) -> (ConnectionId, UnboundedReceiver<String>) {
        let connection_id = ConnectionId::new();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        state.sessions.register(connection_id, tx);
        (connection_id, rx)
    }

    /// Sends one signal; returns whether the router demanded a close.
    async fn send(
        state: &AppState,
        connection_id: ConnectionId,
        signal: &str,
        data: Value,
    ) -> bool {
        let text = json!({"signal": signal, "id": "my_id", "data": data}).to_string();
        handle_message(state, connection_id, &text).await
    }

    fn recv(rx: &mut UnboundedReceiver<String>) -> Value {
        serde_json::from_str(&rx.try_recv().expect("expected a frame")).unwrap()
    }

    /// Fresh, correctly signed credential for `uid`.
    fn credential(uid: &str, weight: f64) -> Value {
        let timestamp = Utc::now()
            .format(TokenAuthenticator::DEFAULT_DATETIME_FORMAT)
            .to_string();
        let token = TokenAuthenticator::new(
            SECRET,
            std::time::Duration::from_secs(60),
            TokenAuthenticator::DEFAULT_DATETIME_FORMAT,
        )
        .issue(uid, &timestamp);
        json!({"uid": uid, "timestamp": timestamp, "token": token, "weight": weight})
    }

    async fn auth_actor(
        state: &AppState,
        connection_id: ConnectionId,
        rx: &mut UnboundedReceiver<String>,
        uid: &str,
    ) {
        let close = send(state, connection_id, "auth", credential(uid, 70.0)).await;
        assert!(!close);
        let response = recv(rx);
        assert_eq!(response["status"], "ok", "auth failed: {response}");
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    #[tokio::test]
    async fn test_auth_success_returns_actor() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        let close = send(&state, conn, "auth", credential("actor1", 70.0)).await;
        assert!(!close);

        let response = recv(&mut rx);
        assert_eq!(response["type"], "response");
        assert_eq!(response["signal"], "auth");
        assert_eq!(response["id"], "my_id");
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["uid"], "actor1");
        assert_eq!(response["data"]["weight"], 70.0);
        assert_eq!(response["data"]["floor"], 1);
        assert_eq!(response["data"]["status"], "IDLE");
    }

    #[tokio::test]
    async fn test_auth_with_foreign_uid_signature_closes_connection() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        // Signature minted for a different uid than the one claimed.
        let mut data = credential("bad_uid", 70.0);
        data["uid"] = json!("actor1");

        let close = send(&state, conn, "auth", data).await;
        assert!(close);

        let response = recv(&mut rx);
        assert_eq!(response["status"], "error");
        assert_eq!(response["data"]["code"], 403);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_but_recoverable() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        // Stale timestamp, twice the freshness window, correctly signed.
        let timestamp = (Utc::now() - chrono::Duration::seconds(120))
            .format(TokenAuthenticator::DEFAULT_DATETIME_FORMAT)
            .to_string();
        let token = state.auth.issue("actor1", &timestamp);
        let data = json!({
            "uid": "actor1", "timestamp": timestamp, "token": token, "weight": 70.0
        });

        let close = send(&state, conn, "auth", data).await;
        assert!(!close, "an expired token must not close the connection");

        let response = recv(&mut rx);
        assert_eq!(response["status"], "error");
        assert_eq!(response["data"]["code"], 403);

        // The same connection can retry with a fresh credential.
        auth_actor(&state, conn, &mut rx, "actor1").await;
    }

    #[tokio::test]
    async fn test_reauth_keeps_existing_actor_state() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        send(&state, conn, "actor_expect", json!({"floor": 5})).await;
        let _ = recv(&mut rx);

        // Second authentication, different claimed weight: the registry
        // returns the same actor, in-flight request intact.
        let close = send(&state, conn, "auth", credential("actor1", 95.0)).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["weight"], 70.0);
        assert_eq!(response["data"]["status"], "EXPECT");
        assert_eq!(response["data"]["need_floor"], 5);
    }

    #[tokio::test]
    async fn test_actor_arrive_broadcast_excludes_the_arriver() {
        let state = app_state();
        let (conn_a, mut rx_a) = connect(&state);
        let (conn_b, mut rx_b) = connect(&state);

        auth_actor(&state, conn_a, &mut rx_a, "actor1").await;
        auth_actor(&state, conn_b, &mut rx_b, "actor2").await;

        // actor1 hears about actor2's arrival.
        let notify = recv(&mut rx_a);
        assert_eq!(notify["type"], "notify");
        assert_eq!(notify["event"], "actor_arrive");
        assert_eq!(notify["data"]["uid"], "actor2");

        // actor2 got only its own auth response, no self-announcement.
        assert!(rx_b.try_recv().is_err());
    }

    // =========================================================================
    // Gating and error taxonomy
    // =========================================================================

    #[tokio::test]
    async fn test_signals_require_authentication() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        for signal in ["lift_list", "actor_list", "actor_idle", "actor_expect"] {
            let close = send(&state, conn, signal, json!({})).await;
            assert!(!close);
            let response = recv(&mut rx);
            assert_eq!(response["status"], "error", "{signal} should be gated");
            assert_eq!(response["data"]["code"], 401);
        }
    }

    #[tokio::test]
    async fn test_gate_runs_before_payload_validation() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        // Garbage payload on an unauthenticated connection: the gate wins,
        // the payload is never inspected.
        let close = send(&state, conn, "actor_expect", json!({"floor": "up"})).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["data"]["code"], 401);
    }

    #[tokio::test]
    async fn test_unknown_signal_is_404() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        let close = send(&state, conn, "lift_dance", json!({})).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["signal"], "lift_dance");
        assert_eq!(response["data"]["code"], 404);
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_400_and_keeps_connection() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);

        let close = handle_message(&state, conn, "this is not json").await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["signal"], "invalid");
        assert_eq!(response["data"]["code"], 400);

        // Valid JSON, invalid shape: the id is still recovered.
        let close = handle_message(&state, conn, r#"{"id": "req-7", "data": {}}"#).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["id"], "req-7");
        assert_eq!(response["data"]["code"], 400);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_400_once_authenticated() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        let close = send(&state, conn, "actor_expect", json!({"floor": 0})).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["data"]["code"], 400);
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[tokio::test]
    async fn test_lift_list_truncates_to_count() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        let close = send(&state, conn, "lift_list", json!({"count": 1})).await;
        assert!(!close);
        let response = recv(&mut rx);
        assert_eq!(response["status"], "ok");
        let lifts = response["data"].as_array().unwrap();
        assert_eq!(lifts.len(), 1);
        assert_eq!(lifts[0]["id"], "lift_0");
        assert_eq!(lifts[0]["status"], "STOPPED");
    }

    #[tokio::test]
    async fn test_lift_list_default_count_covers_small_fleet() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        send(&state, conn, "lift_list", json!({})).await;
        let response = recv(&mut rx);
        assert_eq!(response["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_actor_list_in_uid_order() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "zeta").await;

        let (conn_b, mut rx_b) = connect(&state);
        auth_actor(&state, conn_b, &mut rx_b, "alpha").await;

        send(&state, conn, "actor_list", json!({"count": 1})).await;
        let _arrive = recv(&mut rx); // alpha's arrival notification
        let response = recv(&mut rx);
        let actors = response["data"].as_array().unwrap();
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0]["uid"], "alpha");
    }

    // =========================================================================
    // Actor state transitions over the wire
    // =========================================================================

    #[tokio::test]
    async fn test_expect_then_idle_round_trip() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        send(&state, conn, "actor_expect", json!({"floor": 10})).await;
        let response = recv(&mut rx);
        assert_eq!(response["data"]["status"], "EXPECT");
        assert_eq!(response["data"]["need_floor"], 10);

        send(&state, conn, "actor_idle", json!({})).await;
        let response = recv(&mut rx);
        assert_eq!(response["data"]["status"], "IDLE");
        assert!(response["data"]["need_floor"].is_null());
    }

    #[tokio::test]
    async fn test_expect_for_current_floor_is_a_noop() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        send(&state, conn, "actor_expect", json!({"floor": 1})).await;
        let response = recv(&mut rx);
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["status"], "IDLE");
        assert!(response["data"]["need_floor"].is_null());
    }

    #[tokio::test]
    async fn test_riding_actor_cannot_change_status() {
        let state = app_state();
        let (conn, mut rx) = connect(&state);
        auth_actor(&state, conn, &mut rx, "actor1").await;

        send(&state, conn, "actor_expect", json!({"floor": 10})).await;
        let _ = recv(&mut rx);

        // One tick: the car already waits on floor 1, so actor1 boards.
        state.sim.lock().step();
        assert_eq!(
            state.sim.lock().actor("actor1").unwrap().status(),
            shared_types::ActorStatus::InLift
        );

        send(&state, conn, "actor_idle", json!({})).await;
        let response = recv(&mut rx);
        assert_eq!(response["status"], "ok");
        assert_eq!(response["data"]["status"], "IN_LIFT");

        send(&state, conn, "actor_expect", json!({"floor": 9})).await;
        let response = recv(&mut rx);
        assert_eq!(response["data"]["status"], "IN_LIFT");
        assert_eq!(response["data"]["need_floor"], 10);
    }
}
