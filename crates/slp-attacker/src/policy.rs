use std::collections::HashMap;

use slp_trace::{NodeId, TraceEvent};

use crate::model::AttackerModel;
use crate::state::AttackerState;

/// Decision rule deciding whether an observed reception moves the attacker.
///
/// Policy memory lives in the variant payload. The previous position used by
/// [`PursuitPolicy::OscillationGuarded`] is kept by [`AttackerState`] because
/// every move records it.
#[derive(Debug, Clone, PartialEq)]
pub enum PursuitPolicy {
    Memoryless,
    OscillationGuarded,
    SeqNoGuarded {
        /// Highest sequence number acted upon, per message type.
        sequence_numbers: HashMap<String, u64>,
    },
}

impl PursuitPolicy {
    pub fn seq_no_guarded() -> Self {
        PursuitPolicy::SeqNoGuarded {
            sequence_numbers: HashMap::new(),
        }
    }

    pub fn model(&self) -> AttackerModel {
        match self {
            PursuitPolicy::Memoryless => AttackerModel::Memoryless,
            PursuitPolicy::OscillationGuarded => AttackerModel::OscillationGuarded,
            PursuitPolicy::SeqNoGuarded { .. } => AttackerModel::SeqNoGuarded,
        }
    }

    /// Decide where, if anywhere, `event` should move the attacker.
    ///
    /// Only receptions observed at the attacker's own position are
    /// considered, and a captured attacker never moves again. Deciding does
    /// not touch the policy's memory; call [`PursuitPolicy::commit`] once
    /// the move has been applied.
    pub fn decide(&self, state: &AttackerState, event: &TraceEvent) -> Option<NodeId> {
        if state.found_source() || event.observer_node != state.position() {
            return None;
        }

        let sender = event.sender_node;
        match self {
            PursuitPolicy::Memoryless => Some(sender),

            PursuitPolicy::OscillationGuarded => {
                if state.previous_position() == Some(sender) {
                    None
                } else {
                    Some(sender)
                }
            }

            PursuitPolicy::SeqNoGuarded { sequence_numbers } => {
                let fresh = sequence_numbers
                    .get(&event.message_type)
                    .map_or(true, |&last| event.sequence_number > last);
                fresh.then_some(sender)
            }
        }
    }

    /// Remember an event whose move was applied.
    pub fn commit(&mut self, event: &TraceEvent) {
        if let PursuitPolicy::SeqNoGuarded { sequence_numbers } = self {
            sequence_numbers.insert(event.message_type.clone(), event.sequence_number);
        }
    }

    /// Last sequence number acted upon for `message_type`, if this policy
    /// tracks them.
    pub fn last_sequence_number(&self, message_type: &str) -> Option<u64> {
        match self {
            PursuitPolicy::SeqNoGuarded { sequence_numbers } => {
                sequence_numbers.get(message_type).copied()
            }
            _ => None,
        }
    }
}
