use geo::{Buffer, MultiLineString, MultiPolygon};

use crate::algo::reachability::ReachableSubgraph;
use crate::{Error, WalkNetwork};

/// Walkshed polygon of a reachable subgraph
///
/// Edge geometries are projected into the network's local metric frame,
/// buffered by `buffer_meters` and merged into one (possibly multi-part,
/// possibly holed) polygon, which is returned in WGS84. A subgraph without
/// edges yields an empty multipolygon.
///
/// # Errors
///
/// Returns [`Error::InvalidBuffer`] if `buffer_meters` is not a positive
/// finite distance
pub fn geometrize(
    network: &WalkNetwork,
    subgraph: &ReachableSubgraph,
    buffer_meters: f64,
) -> Result<MultiPolygon<f64>, Error> {
    if !buffer_meters.is_finite() || buffer_meters <= 0.0 {
        return Err(Error::InvalidBuffer(buffer_meters));
    }

    let projection = network.projection();
    let lines: MultiLineString<f64> = subgraph
        .edge_indices()
        .filter_map(|edge| network.edge_line(edge))
        .map(|line| projection.project_geometry(&line))
        .collect();

    if lines.0.is_empty() {
        return Ok(MultiPolygon::new(Vec::new()));
    }

    let buffered = lines.buffer(buffer_meters);
    Ok(projection.unproject_geometry(&buffered))
}
