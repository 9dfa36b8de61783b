use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a sensor node in the simulated network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

/// One packet reception observed by the attacker's channel.
///
/// `time` is in seconds of simulated time; the decoder has already divided
/// the simulator's tick count by its tick rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub time: f64,
    pub message_type: String,
    /// Node at which the reception happened.
    pub observer_node: NodeId,
    /// Node that transmitted the packet.
    pub sender_node: NodeId,
    pub sequence_number: u64,
}
