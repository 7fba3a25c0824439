//! Per-node catchment bands

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::algo::catchment::validate_bands;
use crate::routing::dijkstra::dijkstra_walk_times;
use crate::{Error, OsmNodeId, WalkNetwork, WalkTime};

/// Smallest band within which each node can be reached from any source
///
/// Nodes outside the largest band are absent from the result.
///
/// # Errors
///
/// Returns an error for invalid bands or a source outside the network
pub fn node_catchments(
    network: &WalkNetwork,
    sources: &[NodeIndex],
    bands: &[WalkTime],
) -> Result<HashMap<OsmNodeId, WalkTime>, Error> {
    validate_bands(bands)?;
    if let Some(missing) = sources.iter().find(|s| !network.contains_node(**s)) {
        return Err(Error::NodeNotFound(missing.index()));
    }

    let bands = bands
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .dedup()
        .collect::<Vec<_>>();
    let Some(&max_band) = bands.last() else {
        return Err(Error::EmptyBands);
    };

    let mut walk_times: HashMap<NodeIndex, WalkTime> = HashMap::new();
    for &source in sources {
        for (node, time) in dijkstra_walk_times(network, source, max_band) {
            match walk_times.entry(node) {
                Entry::Vacant(entry) => {
                    entry.insert(time);
                }
                Entry::Occupied(mut entry) => {
                    if time < *entry.get() {
                        entry.insert(time);
                    }
                }
            }
        }
    }

    let mut catchments = HashMap::with_capacity(walk_times.len());
    for (node, time) in walk_times {
        let Some(&band) = bands.iter().find(|band| time <= **band) else {
            continue;
        };
        if let Some(street_node) = network.node(node) {
            catchments.insert(street_node.id, band);
        }
    }

    Ok(catchments)
}
