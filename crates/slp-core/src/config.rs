//! Run configuration.
//!
//! Everything needed to set up the attackers of one run: the node universe,
//! the initial (and scheduled) source sets, the attacker instances and the
//! safety period.

use serde::{Deserialize, Serialize};
use slp_attacker::{AttackerModel, Topology};
use slp_trace::parse::DEFAULT_TICKS_PER_SECOND;
use slp_trace::NodeId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Safety period must be a positive number of seconds, got {value}")]
    InvalidSafetyPeriod { value: f64 },

    #[error("Tick rate must be greater than zero")]
    ZeroTickRate,

    #[error("At least one attacker must be configured")]
    NoAttackers,

    #[error("Topology has no nodes (set network_size or nodes)")]
    EmptyTopology,

    #[error("Source change time must be a non-negative number, got {at}")]
    InvalidSourceChange { at: f64 },
}

/// One attacker instance: which policy it follows and where it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackerConfig {
    #[serde(default)]
    pub model: AttackerModel,
    pub start: NodeId,
}

/// Replace the source set once simulated time reaches `at` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceChange {
    pub at: f64,
    pub sources: Vec<NodeId>,
}

/// Setup of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulator ticks per simulated second, used to convert trace times.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u64,
    /// Seconds of simulated time after which the run counts as not captured.
    #[serde(default)]
    pub safety_period: Option<f64>,
    /// Side length of a square grid topology.
    #[serde(default)]
    pub network_size: Option<u32>,
    /// Explicit node ids, added to the grid if both are given.
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    /// Nodes that are sources when the run starts.
    #[serde(default)]
    pub sources: Vec<NodeId>,
    /// Attacker instances, in the order they receive each event.
    pub attackers: Vec<AttackerConfig>,
    /// Scheduled replacements of the source set, applied in time order.
    #[serde(default)]
    pub mobility: Vec<SourceChange>,
}

fn default_ticks_per_second() -> u64 {
    DEFAULT_TICKS_PER_SECOND
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            safety_period: None,
            network_size: None,
            nodes: Vec::new(),
            sources: Vec::new(),
            attackers: Vec::new(),
            mobility: Vec::new(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if let Some(value) = self.safety_period {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSafetyPeriod { value });
            }
        }
        if self.attackers.is_empty() {
            return Err(ConfigError::NoAttackers);
        }
        if self.topology().is_empty() {
            return Err(ConfigError::EmptyTopology);
        }
        if let Some(change) = self
            .mobility
            .iter()
            .find(|c| !c.at.is_finite() || c.at < 0.0)
        {
            return Err(ConfigError::InvalidSourceChange { at: change.at });
        }
        Ok(())
    }

    pub fn topology(&self) -> Topology {
        self.network_size
            .map(Topology::grid)
            .unwrap_or_default()
            .with_nodes(self.nodes.iter().copied())
    }
}
