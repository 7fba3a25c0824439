use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::state::State;
use crate::{WalkNetwork, WalkTime};

/// Dijkstra's algorithm over the walk network, bounded by a walk time budget
///
/// Returns the shortest walk time in minutes to every node reachable from
/// `start` within `max_cost`, the start node included at zero.
pub fn dijkstra_walk_times(
    network: &WalkNetwork,
    start: NodeIndex,
    max_cost: WalkTime,
) -> HashMap<NodeIndex, WalkTime> {
    let estimated_nodes = network.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, WalkTime> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        for edge in network.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().walk_time;
            if next_cost > max_cost {
                continue;
            }

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}
