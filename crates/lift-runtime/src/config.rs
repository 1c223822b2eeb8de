//! Runtime configuration file.
//!
//! One TOML file configures the whole process; sections map onto the
//! gateway and simulation configs.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [auth]
//! secret_key = "change-me"
//! token_delay_secs = 60
//!
//! [floor]
//! count = 10
//! height = 1.0
//!
//! [lift]
//! count = 3
//! max_weight = 300.0
//! speed = 0.25
//!
//! [sim]
//! loop_delay_secs = 0.5
//! ```

use lift_gateway::{AuthConfig, GatewayConfig};
use lift_sim::SimConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use thiserror::Error;

/// Whole-process configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub server: ServerSection,
    pub auth: AuthConfig,
    pub floor: FloorSection,
    pub lift: LiftSection,
    pub sim: SimSection,
}

impl RuntimeConfig {
    /// Loads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RuntimeConfigError::Read(path.display().to_string(), e.to_string()))?;
        toml::from_str(&content).map_err(|e| RuntimeConfigError::Parse(e.to_string()))
    }

    /// Gateway view of the configuration.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            host: self.server.host,
            port: self.server.port,
            auth: self.auth.clone(),
            ..GatewayConfig::default()
        }
    }

    /// Simulation view of the configuration.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            floor_count: self.floor.count,
            floor_height: self.floor.height,
            lift_count: self.lift.count,
            lift_max_weight: self.lift.max_weight,
            lift_speed: self.lift.speed,
            loop_delay_secs: self.sim.loop_delay_secs,
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
        }
    }
}

/// `[floor]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorSection {
    pub count: u32,
    pub height: f64,
}

impl Default for FloorSection {
    fn default() -> Self {
        Self {
            count: 10,
            height: 1.0,
        }
    }
}

/// `[lift]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftSection {
    pub count: u32,
    pub max_weight: f64,
    pub speed: f64,
}

impl Default for LiftSection {
    fn default() -> Self {
        Self {
            count: 3,
            max_weight: 300.0,
            speed: 0.25,
        }
    }
}

/// `[sim]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSection {
    pub loop_delay_secs: f64,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            loop_delay_secs: 0.5,
        }
    }
}

/// Configuration file failures.
#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    /// File could not be read.
    #[error("cannot read config file {0}: {1}")]
    Read(String, String),

    /// File is not valid TOML for this schema.
    #[error("cannot parse config file: {0}")]
    Parse(String),
}
