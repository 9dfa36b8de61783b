use serde::Serialize;
use slp_attacker::{Attacker, AttackerModel};
use slp_trace::NodeId;

use crate::coordinator::StopReason;

/// Final state of one attacker, as handed to the metrics collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackerSummary {
    pub model: AttackerModel,
    pub start: NodeId,
    pub position: NodeId,
    pub moves: u64,
    pub found_source: bool,
}

impl From<&Attacker> for AttackerSummary {
    fn from(attacker: &Attacker) -> Self {
        Self {
            model: attacker.model(),
            start: attacker.start(),
            position: attacker.position(),
            moves: attacker.moves(),
            found_source: attacker.found_source(),
        }
    }
}

/// Outcome of a single run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub captured: bool,
    /// `None` if the trace ended before any stop condition held.
    pub stop_reason: Option<StopReason>,
    /// Simulated seconds at the last step.
    pub elapsed: f64,
    pub events_processed: u64,
    pub attackers: Vec<AttackerSummary>,
}

impl RunSummary {
    /// Move count of every attacker, in registration order.
    pub fn attacker_moves(&self) -> Vec<u64> {
        self.attackers.iter().map(|a| a.moves).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
