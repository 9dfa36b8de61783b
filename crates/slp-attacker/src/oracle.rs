//! Source membership queries.
//!
//! The source set belongs to the simulation driver and may change identity
//! during a run (mobility). Attackers never keep a copy of it: every found
//! check goes through a [`SourceOracle`] at the moment it is needed.

use std::collections::BTreeSet;

use slp_trace::NodeId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("Source oracle is unavailable (simulation torn down)")]
    Unavailable,
}

/// Answers "is this node currently a source?" against live simulation state.
pub trait SourceOracle {
    fn is_source(&self, node: NodeId) -> Result<bool, OracleError>;
}

/// Driver-owned set of the current source nodes.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: BTreeSet<NodeId>,
    torn_down: bool,
}

impl SourceSet {
    pub fn new(sources: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            torn_down: false,
        }
    }

    /// Mark `node` as a source. Returns false if it already was one.
    pub fn insert(&mut self, node: NodeId) -> bool {
        self.sources.insert(node)
    }

    /// Stop treating `node` as a source. Returns false if it was not one.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.sources.remove(&node)
    }

    /// Move a source from `from` to `to`.
    pub fn relocate(&mut self, from: NodeId, to: NodeId) {
        self.sources.remove(&from);
        self.sources.insert(to);
    }

    /// Replace the whole source set.
    pub fn replace(&mut self, sources: impl IntoIterator<Item = NodeId>) {
        self.sources = sources.into_iter().collect();
    }

    pub fn sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sources.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Release the set at the end of a run; later queries fail.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
        self.sources.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl SourceOracle for SourceSet {
    fn is_source(&self, node: NodeId) -> Result<bool, OracleError> {
        if self.torn_down {
            return Err(OracleError::Unavailable);
        }
        Ok(self.sources.contains(&node))
    }
}
