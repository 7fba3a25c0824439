//! Multi-source reachability: union of cost-bounded balls around access nodes

use fixedbitset::FixedBitSet;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::routing::dijkstra::dijkstra_walk_times;
use crate::{Error, WalkNetwork, WalkTime};

/// Nodes and edges of a walk network reachable within one iso band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableSubgraph {
    nodes: FixedBitSet,
    edges: FixedBitSet,
}

impl ReachableSubgraph {
    fn empty(network: &WalkNetwork) -> Self {
        Self {
            nodes: FixedBitSet::with_capacity(network.node_count()),
            edges: FixedBitSet::with_capacity(network.edge_count()),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.count_ones(..)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.count_ones(..)
    }

    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.nodes.contains(node.index())
    }

    pub fn contains_edge(&self, edge: EdgeIndex) -> bool {
        self.edges.contains(edge.index())
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.ones().map(NodeIndex::new)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.edges.ones().map(EdgeIndex::new)
    }

    /// True if every node and edge of `self` is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.nodes.is_subset(&other.nodes) && self.edges.is_subset(&other.edges)
    }

    fn union_with(&mut self, other: &Self) {
        self.nodes.union_with(&other.nodes);
        self.edges.union_with(&other.edges);
    }
}

/// Ego graph of a single source: every node within `budget` minutes and
/// every edge with both endpoints among those nodes
fn reachability_ball(network: &WalkNetwork, source: NodeIndex, budget: WalkTime) -> ReachableSubgraph {
    let mut ball = ReachableSubgraph::empty(network);

    let walk_times = dijkstra_walk_times(network, source, budget);
    for node in walk_times.keys() {
        ball.nodes.insert(node.index());
    }

    for node in walk_times.keys() {
        for edge in network.edges(*node) {
            if ball.nodes.contains(edge.target().index()) {
                ball.edges.insert(edge.id().index());
            }
        }
    }

    ball
}

/// Part of the walk network reachable from any source within `budget` minutes
///
/// The per-source balls are computed independently and unioned, so the result
/// holds what can be walked to from *any* access node. Edge direction is
/// respected; symmetrize the street graph beforehand for two-way walking.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`] for a source outside the network and
/// [`Error::InvalidBand`] for a negative or non-finite budget
pub fn reachable_subgraph(
    network: &WalkNetwork,
    sources: &[NodeIndex],
    budget: WalkTime,
) -> Result<ReachableSubgraph, Error> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(Error::InvalidBand(budget));
    }
    if let Some(missing) = sources.iter().find(|s| !network.contains_node(**s)) {
        return Err(Error::NodeNotFound(missing.index()));
    }

    let mut reachable = ReachableSubgraph::empty(network);
    for &source in sources {
        reachable.union_with(&reachability_ball(network, source, budget));
    }

    log::debug!(
        "{} sources reach {} nodes and {} edges within {budget} minutes",
        sources.len(),
        reachable.node_count(),
        reachable.edge_count()
    );

    Ok(reachable)
}
