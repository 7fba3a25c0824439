//! Terrain enrichment: node elevations and edge grades

use geo::Point;
use log::info;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::{Error, StreetGraph};

/// Provider of ground elevation, e.g. a set of DEM raster tiles
pub trait ElevationSource {
    /// Elevation in meters at a WGS84 point (x = longitude, y = latitude)
    ///
    /// # Errors
    ///
    /// Any failure to sample the terrain at `point`
    fn elevation_at(&self, point: Point<f64>) -> Result<f64, Error>;
}

/// Samples an elevation for every node, then derives edge grades
///
/// Returns a new graph; the input is left untouched, also on failure.
///
/// # Errors
///
/// Propagates source errors and rejects non-finite elevations
pub fn enrich_with_elevation<S>(graph: &StreetGraph, source: &S) -> Result<StreetGraph, Error>
where
    S: ElevationSource + Sync + ?Sized,
{
    let elevations = graph
        .graph
        .node_weights()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|node| {
            let elevation = source.elevation_at(node.geometry)?;
            if elevation.is_finite() {
                Ok(elevation)
            } else {
                Err(Error::InvalidData(format!(
                    "Elevation source returned {elevation} for node {}",
                    node.id
                )))
            }
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut enriched = graph.clone();
    for (node, elevation) in enriched.graph.node_weights_mut().zip(elevations) {
        node.elevation = Some(elevation);
    }

    info!("Sampled elevations for {} nodes", enriched.node_count());
    add_edge_grades(&enriched)
}

/// Sets every edge's grade to its rise over run
///
/// Zero-length edges get a grade of 0.
///
/// # Errors
///
/// Returns [`Error::MissingElevation`] if an edge endpoint has no elevation
pub fn add_edge_grades(graph: &StreetGraph) -> Result<StreetGraph, Error> {
    let mut graded = graph.clone();

    for edge in graph.graph.edge_indices() {
        let Some((u, v)) = graph.graph.edge_endpoints(edge) else {
            continue;
        };
        let elevation = |node: NodeIndex| {
            let node = &graph.graph[node];
            node.elevation.ok_or(Error::MissingElevation(node.id))
        };
        let rise = elevation(v)? - elevation(u)?;

        let weight = &mut graded.graph[edge];
        weight.grade = Some(if weight.length > 0.0 {
            rise / weight.length
        } else {
            0.0
        });
    }

    Ok(graded)
}
