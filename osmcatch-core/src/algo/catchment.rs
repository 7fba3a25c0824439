//! Walk catchments for a location: one buffered walkshed per iso band

use std::borrow::Cow;

use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;

use crate::algo::reachability::reachable_subgraph;
use crate::cost::assign_costs;
use crate::geometry::geometrize;
use crate::loading::{CatchmentConfig, WalkDirection};
use crate::{AccessPoint, CatchmentRecord, Error, StreetGraph, WalkNetwork, WalkTime};

/// Checks that there is at least one band and every band is a finite,
/// non-negative number of minutes
///
/// # Errors
///
/// Returns [`Error::EmptyBands`] or [`Error::InvalidBand`] with the first
/// offending value
pub fn validate_bands(bands: &[WalkTime]) -> Result<(), Error> {
    if bands.is_empty() {
        return Err(Error::EmptyBands);
    }
    match bands.iter().find(|band| !band.is_finite() || **band < 0.0) {
        Some(&band) => Err(Error::InvalidBand(band)),
        None => Ok(()),
    }
}

fn validate_access_points(access_points: &[AccessPoint]) -> Result<(), Error> {
    if access_points.is_empty() {
        return Err(Error::EmptyAccessPoints);
    }
    if let Some(point) = access_points
        .iter()
        .find(|p| !p.lat.is_finite() || !p.lng.is_finite())
    {
        return Err(Error::InvalidData(format!(
            "Access point {point:?} has non-finite coordinates"
        )));
    }
    Ok(())
}

/// Builds the walk catchments of a location from a raw street graph
///
/// The graph is symmetrized according to `config.walk_direction`, costed with
/// `config.speed` and then handed to [`WalkNetwork::iso_bands`]. The input
/// graph is never modified. Records come back in descending band order, one
/// per requested band (duplicates included).
///
/// # Errors
///
/// All arguments are validated before any work is done. Costing fails with
/// [`Error::MissingGradeAttribute`] when a slope-adjusted profile meets an
/// edge without grade.
pub fn build_catchment(
    location_name: &str,
    access_points: &[AccessPoint],
    bands: &[WalkTime],
    config: &CatchmentConfig,
    graph: &StreetGraph,
) -> Result<Vec<CatchmentRecord>, Error> {
    validate_access_points(access_points)?;
    validate_bands(bands)?;
    config.validate()?;
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let graph = match config.walk_direction {
        WalkDirection::Bidirectional => Cow::Owned(graph.to_bidirectional()),
        WalkDirection::AsDigitized => Cow::Borrowed(graph),
    };

    let network = assign_costs(&graph, &config.speed)?;
    network.iso_bands(location_name, access_points, bands, config.buffer_meters)
}

impl WalkNetwork {
    /// Walk catchments of already costed network
    ///
    /// Access points are snapped once, then every band is computed in
    /// parallel. Records are ordered by descending band, ties keep their
    /// request order.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the arguments and [`Error::EmptyGraph`]
    /// for a network without nodes
    pub fn iso_bands(
        &self,
        location_name: &str,
        access_points: &[AccessPoint],
        bands: &[WalkTime],
        buffer_meters: f64,
    ) -> Result<Vec<CatchmentRecord>, Error> {
        validate_access_points(access_points)?;
        validate_bands(bands)?;
        if !buffer_meters.is_finite() || buffer_meters <= 0.0 {
            return Err(Error::InvalidBuffer(buffer_meters));
        }

        let sources = self.nearest_nodes(access_points)?;
        let mut access_nodes = Vec::with_capacity(sources.len());
        for (point, &node) in access_points.iter().zip(&sources) {
            let street_node = self.node(node).ok_or(Error::NodeNotFound(node.index()))?;
            debug!(
                "Snapped {point:?} to node {} ({:.1} m away)",
                street_node.id,
                self.snap_distance(point, node).unwrap_or(f64::NAN)
            );
            access_nodes.push(street_node.id);
        }

        let bands = bands
            .iter()
            .copied()
            .sorted_by(|a, b| b.total_cmp(a))
            .collect::<Vec<_>>();

        info!(
            "Building {} catchments for {location_name} from {} access nodes",
            bands.len(),
            sources.len()
        );

        let records = bands
            .par_iter()
            .map(|&band| {
                let subgraph = reachable_subgraph(self, &sources, band)?;
                let geometry = geometrize(self, &subgraph, buffer_meters)?;
                debug!(
                    "{band} minute band of {location_name} covers {} edges",
                    subgraph.edge_count()
                );

                Ok(CatchmentRecord {
                    location_name: location_name.to_string(),
                    access_points: access_points.to_vec(),
                    access_nodes: access_nodes.clone(),
                    iso_band: band,
                    geometry,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        info!("Built {} catchments for {location_name}", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use geo::{Area, Contains, Point};

    use super::*;
    use crate::cost::SpeedProfile;
    use crate::loading::StreetGraphBuilder;

    /// Two-way grid of `size` x `size` nodes, 0.001 degrees apart at the
    /// equator (about 111 m, 1.4 minutes at 4.8 km/h)
    fn grid(size: i64) -> StreetGraph {
        let mut builder = StreetGraphBuilder::new();
        for row in 0..size {
            for col in 0..size {
                builder.add_node(row * size + col, row as f64 * 0.001, col as f64 * 0.001);
            }
        }
        for row in 0..size {
            for col in 0..size {
                let id = row * size + col;
                if col + 1 < size {
                    builder.add_two_way_segment(id, id + 1).unwrap();
                }
                if row + 1 < size {
                    builder.add_two_way_segment(id, id + size).unwrap();
                }
            }
        }
        builder.build()
    }

    fn center() -> AccessPoint {
        AccessPoint::new(0.002, 0.002)
    }

    #[test]
    fn one_record_per_band_in_descending_order() {
        let records = build_catchment(
            "Station",
            &[center()],
            &[5.0, 10.0, 5.0],
            &CatchmentConfig::default(),
            &grid(5),
        )
        .unwrap();

        let bands: Vec<_> = records.iter().map(|r| r.iso_band).collect();
        assert_eq!(bands, vec![10.0, 5.0, 5.0]);
        assert!(records.iter().all(|r| r.location_name == "Station"));
        assert!(records.iter().all(|r| r.access_nodes == vec![12]));
        assert_eq!(records[1].geometry, records[2].geometry);
    }

    #[test]
    fn larger_band_covers_more_ground() {
        let records = build_catchment(
            "Station",
            &[center()],
            &[2.0, 5.0],
            &CatchmentConfig::default(),
            &grid(5),
        )
        .unwrap();

        let (large, small) = (&records[0].geometry, &records[1].geometry);
        assert!(large.unsigned_area() > small.unsigned_area());
        assert!(large.contains(&Point::new(0.002, 0.002)));
    }

    #[test]
    fn zero_band_has_empty_geometry() {
        let records = build_catchment(
            "Station",
            &[center()],
            &[0.0],
            &CatchmentConfig::default(),
            &grid(3),
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].geometry.0.is_empty());
    }

    #[test]
    fn arguments_are_validated_first() {
        let config = CatchmentConfig::default();
        let graph = grid(3);

        assert!(matches!(
            build_catchment("x", &[], &[5.0], &config, &graph),
            Err(Error::EmptyAccessPoints)
        ));
        assert!(matches!(
            build_catchment("x", &[center()], &[], &config, &graph),
            Err(Error::EmptyBands)
        ));
        assert!(matches!(
            build_catchment("x", &[center()], &[5.0, -1.0], &config, &graph),
            Err(Error::InvalidBand(b)) if b == -1.0
        ));
        assert!(matches!(
            build_catchment("x", &[center()], &[f64::NAN], &config, &graph),
            Err(Error::InvalidBand(_))
        ));

        let bad_buffer = CatchmentConfig {
            buffer_meters: 0.0,
            ..CatchmentConfig::default()
        };
        assert!(matches!(
            build_catchment("x", &[center()], &[5.0], &bad_buffer, &graph),
            Err(Error::InvalidBuffer(_))
        ));
    }

    #[test]
    fn slope_profile_requires_grades() {
        let config = CatchmentConfig {
            speed: SpeedProfile::slope_adjusted(1.5),
            ..CatchmentConfig::default()
        };
        assert!(matches!(
            build_catchment("x", &[center()], &[5.0], &config, &grid(3)),
            Err(Error::MissingGradeAttribute { .. })
        ));
    }

    #[test]
    fn graph_without_edges_gives_empty_geometries() {
        let mut builder = StreetGraphBuilder::new();
        builder.add_node(1, 0.0, 0.0).add_node(2, 0.0, 0.001);
        let graph = builder.build();

        let records =
            build_catchment("x", &[center()], &[10.0, 5.0], &CatchmentConfig::default(), &graph)
                .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].iso_band, 10.0);
        assert!(records.iter().all(|r| r.geometry.0.is_empty()));
    }

    #[test]
    fn empty_graph_is_rejected() {
        let graph = StreetGraphBuilder::new().build();
        assert!(matches!(
            build_catchment("x", &[center()], &[5.0], &CatchmentConfig::default(), &graph),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn one_way_streets_follow_walk_direction() {
        // 1 -> 2 only, source at 2
        let mut builder = StreetGraphBuilder::new();
        builder.add_node(1, 0.0, 0.0).add_node(2, 0.0, 0.001);
        builder.add_segment(1, 2).unwrap();
        let graph = builder.build();
        let at_end = AccessPoint::new(0.0, 0.001);

        let digitized = CatchmentConfig {
            walk_direction: WalkDirection::AsDigitized,
            ..CatchmentConfig::default()
        };
        let records = build_catchment("x", &[at_end], &[5.0], &digitized, &graph).unwrap();
        assert!(records[0].geometry.0.is_empty());

        let records =
            build_catchment("x", &[at_end], &[5.0], &CatchmentConfig::default(), &graph).unwrap();
        assert!(!records[0].geometry.0.is_empty());
    }
}
