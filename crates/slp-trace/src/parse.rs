use crate::types::{NodeId, TraceEvent};

/// Tick rate of the packet-level simulator (ticks per simulated second).
pub const DEFAULT_TICKS_PER_SECOND: u64 = 10_000_000_000;

/// Name of the observation channel attackers subscribe to.
pub const ATTACKER_CHANNEL: &str = "Attacker-RCV";

const FIELD_COUNT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    #[error("Malformed trace line '{line}': {reason}")]
    MalformedTrace { line: String, reason: String },

    #[error("Tick rate must be greater than zero")]
    InvalidTickRate,
}

impl TraceError {
    fn malformed(line: &str, reason: impl Into<String>) -> Self {
        TraceError::MalformedTrace {
            line: line.trim_end().to_string(),
            reason: reason.into(),
        }
    }
}

/// Decodes `time,message_type,observer_node,sender_node,sequence_number`
/// lines into [`TraceEvent`]s.
#[derive(Debug, Clone, Copy)]
pub struct TraceDecoder {
    ticks_per_second: u64,
}

impl TraceDecoder {
    pub fn new(ticks_per_second: u64) -> Result<Self, TraceError> {
        if ticks_per_second == 0 {
            return Err(TraceError::InvalidTickRate);
        }
        Ok(Self { ticks_per_second })
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }

    /// Decode a single observation line.
    pub fn decode(&self, line: &str) -> Result<TraceEvent, TraceError> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(TraceError::malformed(
                line,
                format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            ));
        }

        let ticks: f64 = fields[0]
            .trim()
            .parse()
            .map_err(|_| TraceError::malformed(line, format!("bad time '{}'", fields[0])))?;
        if !ticks.is_finite() || ticks < 0.0 {
            return Err(TraceError::malformed(
                line,
                format!("time '{}' is not a non-negative number", fields[0]),
            ));
        }

        let message_type = fields[1].trim();
        if message_type.is_empty() {
            return Err(TraceError::malformed(line, "empty message type"));
        }

        let observer_node = parse_node(line, "observer node", fields[2])?;
        let sender_node = parse_node(line, "sender node", fields[3])?;
        let sequence_number: u64 = fields[4].trim().parse().map_err(|_| {
            TraceError::malformed(line, format!("bad sequence number '{}'", fields[4]))
        })?;

        Ok(TraceEvent {
            time: ticks / self.ticks_per_second as f64,
            message_type: message_type.to_string(),
            observer_node,
            sender_node,
            sequence_number,
        })
    }
}

impl Default for TraceDecoder {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
        }
    }
}

fn parse_node(line: &str, what: &str, field: &str) -> Result<NodeId, TraceError> {
    field
        .trim()
        .parse::<u32>()
        .map(NodeId)
        .map_err(|_| TraceError::malformed(line, format!("bad {what} '{field}'")))
}

/// Decode one line without keeping a decoder around.
pub fn decode_line(line: &str, ticks_per_second: u64) -> Result<TraceEvent, TraceError> {
    TraceDecoder::new(ticks_per_second)?.decode(line)
}
