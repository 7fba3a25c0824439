use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::WalkTime;

#[derive(Copy, Clone, PartialEq)]
pub(super) struct State {
    pub(super) cost: WalkTime,
    pub(super) node: NodeIndex,
}

// Walk times are always finite, so total ordering is sound
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
