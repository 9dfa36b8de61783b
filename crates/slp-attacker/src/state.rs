use slp_trace::{NodeId, TraceDecoder, TraceError, TraceEvent};
use tracing::{debug, trace, warn};

use crate::model::AttackerModel;
use crate::oracle::{OracleError, SourceOracle};
use crate::policy::PursuitPolicy;
use crate::topology::Topology;

#[derive(Debug, thiserror::Error)]
pub enum AttackerError {
    #[error("Start node {node} is not part of the topology")]
    InvalidStartNode { node: NodeId },

    #[error("Cannot determine source membership: {0}")]
    OracleUnavailable(#[from] OracleError),

    #[error("Trace error: {0}")]
    Trace(#[from] TraceError),
}

/// Position and progress of a single attacker.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackerState {
    position: NodeId,
    previous_position: Option<NodeId>,
    move_count: u64,
    found_source: bool,
}

impl AttackerState {
    pub fn position(&self) -> NodeId {
        self.position
    }

    /// Position held before the current one, `None` before the first move.
    pub fn previous_position(&self) -> Option<NodeId> {
        self.previous_position
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    /// Whether the position at the last move was a source.
    pub fn found_source(&self) -> bool {
        self.found_source
    }

    /// Move to `new_position` and re-evaluate whether a source was reached.
    pub fn apply_move(
        &mut self,
        new_position: NodeId,
        oracle: &dyn SourceOracle,
    ) -> Result<(), AttackerError> {
        let found_source = oracle.is_source(new_position)?;
        self.previous_position = Some(self.position);
        self.position = new_position;
        self.found_source = found_source;
        self.move_count += 1;
        Ok(())
    }
}

/// An attacker instance: a pursuit policy driving its own state.
#[derive(Debug, Clone)]
pub struct Attacker {
    model: AttackerModel,
    start: NodeId,
    policy: PursuitPolicy,
    state: AttackerState,
}

impl Attacker {
    /// Place a new attacker at `start`.
    ///
    /// Placement counts as a move for the found check only: afterwards the
    /// move counter is zero and there is no previous position.
    pub fn new(
        model: AttackerModel,
        start: NodeId,
        topology: &Topology,
        oracle: &dyn SourceOracle,
    ) -> Result<Self, AttackerError> {
        if !topology.contains(start) {
            return Err(AttackerError::InvalidStartNode { node: start });
        }

        let mut state = AttackerState {
            position: start,
            previous_position: None,
            move_count: 0,
            found_source: false,
        };
        state.apply_move(start, oracle)?;
        state.move_count = 0;
        state.previous_position = None;

        if state.found_source {
            warn!(%start, %model, "attacker placed directly on a source");
        }

        Ok(Self {
            model,
            start,
            policy: model.policy(),
            state,
        })
    }

    /// React to one observed reception. Returns the new position if the
    /// attacker moved.
    pub fn observe(
        &mut self,
        event: &TraceEvent,
        oracle: &dyn SourceOracle,
    ) -> Result<Option<NodeId>, AttackerError> {
        let Some(next) = self.policy.decide(&self.state, event) else {
            trace!(
                model = %self.model,
                position = %self.state.position,
                observer = %event.observer_node,
                sender = %event.sender_node,
                "no move"
            );
            return Ok(None);
        };

        let from = self.state.position;
        self.state.apply_move(next, oracle)?;
        self.policy.commit(event);
        debug!(
            model = %self.model,
            time = event.time,
            %from,
            to = %next,
            moves = self.state.move_count,
            found_source = self.state.found_source,
            "attacker moved"
        );
        Ok(Some(next))
    }

    /// Decode a raw observation line and react to it.
    pub fn process_line(
        &mut self,
        line: &str,
        decoder: &TraceDecoder,
        oracle: &dyn SourceOracle,
    ) -> Result<Option<NodeId>, AttackerError> {
        let event = decoder.decode(line)?;
        self.observe(&event, oracle)
    }

    /// Query the oracle for the current position without moving.
    pub fn recheck_found(&self, oracle: &dyn SourceOracle) -> Result<bool, AttackerError> {
        Ok(oracle.is_source(self.state.position)?)
    }

    pub fn model(&self) -> AttackerModel {
        self.model
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn position(&self) -> NodeId {
        self.state.position
    }

    pub fn previous_position(&self) -> Option<NodeId> {
        self.state.previous_position
    }

    pub fn moves(&self) -> u64 {
        self.state.move_count
    }

    pub fn found_source(&self) -> bool {
        self.state.found_source
    }

    pub fn state(&self) -> &AttackerState {
        &self.state
    }

    pub fn policy(&self) -> &PursuitPolicy {
        &self.policy
    }
}
