//! # Simulation Integration Tests
//!
//! End-to-end rides: the dispatch engine, the session fan-out, and the
//! wire frames a client actually observes, driven tick by tick without
//! the timer so every step is deterministic.
//!
//! ## Covered Contract
//!
//! 1. **The canonical ride**: an actor requests floor 10, the car travels
//!    monotonically, `enter_lift` precedes `drop_off`, the actor ends idle
//! 2. **Capacity**: no car ever carries more than its weight limit
//! 3. **Stop ordering**: alighting notifications precede boarding ones at
//!    a shared stop

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lift_gateway::router::{handle_message, AppState};
    use lift_gateway::session::ConnectionId;
    use lift_gateway::{AuthConfig, GatewayConfig, SessionNotifier};
    use lift_sim::{EventSink, SimConfig, SimulationState};
    use serde_json::{json, Value};
    use shared_auth::TokenAuthenticator;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    const SECRET: &str = "simulation-secret";

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    struct Harness {
        state: AppState,
        notifier: SessionNotifier,
    }

    impl Harness {
        fn new(sim_config: SimConfig) -> Self {
            let config = GatewayConfig {
                auth: AuthConfig {
                    secret_key: SECRET.into(),
                    ..AuthConfig::default()
                },
                ..GatewayConfig::default()
            };
            let state = AppState::new(&config, SimulationState::new(sim_config).into_shared());
            let notifier = SessionNotifier::new(Arc::clone(&state.sessions));
            Self { state, notifier }
        }

        fn connect(&self) -> (ConnectionId, UnboundedReceiver<String>) {
            let connection_id = ConnectionId::new();
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
            self.state.sessions.register(connection_id, tx);
            (connection_id, rx)
        }

        async fn auth(&self, connection_id: ConnectionId, uid: &str, weight: f64) {
            let timestamp = Utc::now()
                .format(TokenAuthenticator::DEFAULT_DATETIME_FORMAT)
                .to_string();
            let token = self.state.auth.issue(uid, &timestamp);
            let text = json!({
                "signal": "auth",
                "id": null,
                "data": {"uid": uid, "timestamp": timestamp, "token": token, "weight": weight}
            })
            .to_string();
            assert!(!handle_message(&self.state, connection_id, &text).await);
        }

        async fn expect_floor(&self, connection_id: ConnectionId, floor: u32) {
            let text = json!({
                "signal": "actor_expect", "id": null, "data": {"floor": floor}
            })
            .to_string();
            assert!(!handle_message(&self.state, connection_id, &text).await);
        }

        /// One simulation tick, with events fanned out like the loop does.
        async fn tick(&self) {
            let events = self.state.sim.lock().step();
            for event in events {
                self.notifier.publish(event).await;
            }
        }
    }

    /// Drains a receiver, returning only the notify frames.
    fn drain_notifies(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
        let mut notifies = Vec::new();
        while let Ok(text) = rx.try_recv() {
            let value: Value = serde_json::from_str(&text).unwrap();
            if value["type"] == "notify" {
                notifies.push(value);
            }
        }
        notifies
    }

    // =========================================================================
    // The canonical ride
    // =========================================================================

    #[tokio::test]
    async fn test_actor_rides_to_floor_ten() {
        let harness = Harness::new(SimConfig {
            lift_count: 1,
            lift_speed: 1.0,
            ..SimConfig::default()
        });
        let (conn, mut rx) = harness.connect();
        harness.auth(conn, "actor1", 70.0).await;
        harness.expect_floor(conn, 10).await;

        let mut last_position = harness.state.sim.lock().lifts()[0].position();
        let mut notifies = Vec::new();
        for _ in 0..20 {
            harness.tick().await;

            // The car never backtracks on its way up to floor 10.
            let position = harness.state.sim.lock().lifts()[0].position();
            assert!(
                position >= last_position,
                "car moved away from its target: {position} < {last_position}"
            );
            last_position = position;

            notifies.extend(drain_notifies(&mut rx));
        }

        let events: Vec<&str> = notifies
            .iter()
            .map(|n| n["event"].as_str().unwrap())
            .collect();
        assert_eq!(events, ["enter_lift", "drop_off"]);
        assert_eq!(notifies[1]["data"]["floor"], 10);
        assert_eq!(notifies[1]["data"]["id"], "lift_0");

        let sim = harness.state.sim.lock();
        let actor = sim.actor("actor1").unwrap();
        assert_eq!(actor.status(), shared_types::ActorStatus::Idle);
        assert_eq!(actor.floor(), 10);
        assert!(actor.need_floor().is_none());
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    #[tokio::test]
    async fn test_no_car_ever_exceeds_capacity() {
        let harness = Harness::new(SimConfig {
            lift_count: 2,
            lift_speed: 1.0,
            lift_max_weight: 200.0,
            ..SimConfig::default()
        });

        // More waiting weight than the whole fleet can carry at once.
        let riders: &[(&str, f64, u32)] = &[
            ("a", 90.0, 5),
            ("b", 90.0, 6),
            ("c", 90.0, 7),
            ("d", 60.0, 8),
            ("e", 120.0, 9),
            ("f", 45.0, 3),
        ];
        for (uid, weight, floor) in riders {
            let (conn, _rx) = harness.connect();
            harness.auth(conn, uid, *weight).await;
            harness.expect_floor(conn, *floor).await;
        }

        for _ in 0..80 {
            harness.tick().await;

            let sim = harness.state.sim.lock();
            for lift in sim.lifts() {
                let load: f64 = lift
                    .passengers()
                    .iter()
                    .filter_map(|uid| sim.actor(uid))
                    .map(|actor| actor.weight())
                    .sum();
                assert!(
                    load <= lift.max_weight(),
                    "lift {} overloaded: {load} > {}",
                    lift.id(),
                    lift.max_weight()
                );
            }
        }
    }

    // =========================================================================
    // Stop ordering
    // =========================================================================

    #[tokio::test]
    async fn test_drop_off_notified_before_enter_lift_at_shared_stop() {
        let harness = Harness::new(SimConfig {
            lift_count: 1,
            lift_speed: 1.0,
            ..SimConfig::default()
        });

        // The rider travels to floor 4, where another actor waits.
        let (rider_conn, mut rider_rx) = harness.connect();
        harness.auth(rider_conn, "rider", 70.0).await;
        harness.expect_floor(rider_conn, 4).await;

        let (waiter_conn, mut waiter_rx) = harness.connect();
        harness.auth(waiter_conn, "waiter", 70.0).await;
        {
            let mut sim = harness.state.sim.lock();
            sim.actor_mut("waiter").unwrap().set_floor(4);
        }
        harness.expect_floor(waiter_conn, 1).await;

        // Timestamped transcript of everything both clients observe.
        let mut transcript: Vec<(String, String)> = Vec::new();
        for _ in 0..20 {
            harness.tick().await;
            for notify in drain_notifies(&mut rider_rx) {
                transcript.push(("rider".into(), notify["event"].as_str().unwrap().into()));
            }
            for notify in drain_notifies(&mut waiter_rx) {
                transcript.push(("waiter".into(), notify["event"].as_str().unwrap().into()));
            }
        }

        let rider_drop = transcript
            .iter()
            .position(|(who, event)| who == "rider" && event == "drop_off")
            .expect("rider never dropped off");
        let waiter_enter = transcript
            .iter()
            .position(|(who, event)| who == "waiter" && event == "enter_lift")
            .expect("waiter never boarded");
        assert!(
            rider_drop < waiter_enter,
            "boarding was notified before alighting at the shared stop"
        );
    }
}
