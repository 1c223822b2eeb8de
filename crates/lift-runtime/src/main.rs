//! # Microlift Runtime
//!
//! Process entry point for the lift simulation service.
//!
//! ## Startup Sequence
//!
//! 1. Parse CLI arguments
//! 2. Load and validate configuration (TOML file or defaults)
//! 3. Initialize tracing
//! 4. Build the shared simulation state and the gateway
//! 5. Start the tick loop, then serve until a shutdown signal
//!
//! ```text
//!  client ws ──→ gateway router ──→ SimulationState ←── tick loop
//!                     │                                    │
//!                     └───── session fan-out ←── events ───┘
//! ```

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::RuntimeConfig;
use lift_gateway::GatewayService;
use lift_sim::{SimulationService, SimulationState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Multi-lift building simulation service.
#[derive(Debug, Parser)]
#[command(name = "lift-runtime", version, about)]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => RuntimeConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RuntimeConfig::default(),
    };

    let sim_config = config.sim_config();
    sim_config
        .validate()
        .context("invalid simulation configuration")?;

    info!(
        lift_count = sim_config.lift_count,
        floor_count = sim_config.floor_count,
        loop_delay_secs = sim_config.loop_delay_secs,
        "[runtime] starting microlift"
    );

    let tick_interval = sim_config.tick_interval();
    let sim = SimulationState::new(sim_config).into_shared();

    let gateway = GatewayService::new(config.gateway_config(), sim.clone())
        .context("invalid gateway configuration")?;

    let simulation = SimulationService::new(sim, gateway.notifier(), tick_interval);
    simulation.start();

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("[runtime] shutdown signal received");
    };

    gateway.serve(shutdown).await.context("gateway failed")?;

    simulation.stop();
    info!("[runtime] stopped");
    Ok(())
}
