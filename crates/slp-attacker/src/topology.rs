use std::collections::BTreeSet;

use slp_trace::NodeId;

/// The set of node ids that exist in the simulated network.
///
/// A square grid is kept as a bound on the id rather than as one entry per
/// node, so large grids cost nothing to build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Topology {
    /// Ids `0..grid_nodes` all exist.
    grid_nodes: u64,
    /// Ids outside the grid range.
    extra: BTreeSet<NodeId>,
}

impl Topology {
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self::default().with_nodes(nodes)
    }

    /// Square grid of `network_size` x `network_size` nodes, numbered
    /// row-major from 0.
    pub fn grid(network_size: u32) -> Self {
        Self {
            grid_nodes: u64::from(network_size) * u64::from(network_size),
            extra: BTreeSet::new(),
        }
    }

    /// Add explicit node ids on top of any grid.
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let grid_nodes = self.grid_nodes;
        self.extra.extend(
            nodes
                .into_iter()
                .filter(|node| u64::from(node.get()) >= grid_nodes),
        );
        self
    }

    pub fn contains(&self, node: NodeId) -> bool {
        u64::from(node.get()) < self.grid_nodes || self.extra.contains(&node)
    }

    pub fn len(&self) -> u64 {
        self.grid_nodes + self.extra.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every node id in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        // A u32 id space caps the grid range, so the cast cannot truncate.
        let grid_end = self.grid_nodes.min(u64::from(u32::MAX) + 1);
        (0..grid_end)
            .map(|id| NodeId(id as u32))
            .chain(self.extra.iter().copied())
    }
}
