use std::collections::BTreeSet;

use geo::{Area, Contains, Point};
use osmcatch_core::prelude::*;
use petgraph::graph::NodeIndex;

/// Two-way grid of `size` x `size` nodes, 0.001 degrees apart near the
/// equator, node ids are `row * size + col`
fn street_grid(size: i64) -> StreetGraph {
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

fn node_set(subgraph: &ReachableSubgraph) -> BTreeSet<NodeIndex> {
    subgraph.node_indices().collect()
}

/// Ground rising northward with the given elevation per degree of latitude
struct Tilted(f64);

impl ElevationSource for Tilted {
    fn elevation_at(&self, point: Point<f64>) -> Result<f64, Error> {
        Ok(point.y() * self.0)
    }
}

#[test]
fn reachable_subgraphs_grow_with_the_band() {
    let network = assign_costs(&street_grid(9), &SpeedProfile::default()).unwrap();
    let sources = network
        .nearest_nodes(&[AccessPoint::new(0.004, 0.004)])
        .unwrap();

    let bands = [0.0, 1.0, 2.5, 5.0, 7.5, 15.0];
    let subgraphs: Vec<_> = bands
        .iter()
        .map(|&band| reachable_subgraph(&network, &sources, band).unwrap())
        .collect();

    for pair in subgraphs.windows(2) {
        assert!(pair[0].is_subset(&pair[1]));
    }
    assert_eq!(subgraphs[0].node_count(), 1);
    assert_eq!(subgraphs[0].edge_count(), 0);
    assert_eq!(subgraphs.last().unwrap().node_count(), 81);
}

#[test]
fn multi_source_nodes_are_union_of_single_sources() {
    let network = assign_costs(&street_grid(12), &SpeedProfile::default()).unwrap();
    let sources = network
        .nearest_nodes(&[AccessPoint::new(0.001, 0.001), AccessPoint::new(0.010, 0.010)])
        .unwrap();

    let combined = reachable_subgraph(&network, &sources, 4.0).unwrap();
    let mut expected = BTreeSet::new();
    for source in &sources {
        expected.extend(node_set(&reachable_subgraph(&network, &[*source], 4.0).unwrap()));
    }

    assert_eq!(node_set(&combined), expected);
}

#[test]
fn catchment_records_follow_requested_bands() {
    let points = AccessPoints::from((0.003, 0.003));
    let bands = IsoBands::from([5.0, 15.0, 10.0, 5.0]);

    let records = build_catchment(
        "Grid Station",
        &points,
        &bands,
        &CatchmentConfig::default(),
        &street_grid(7),
    )
    .unwrap();

    let iso_bands: Vec<_> = records.iter().map(|r| r.iso_band).collect();
    assert_eq!(iso_bands, vec![15.0, 10.0, 5.0, 5.0]);
    assert!(records.iter().all(|r| r.access_points == *points));
    assert!(records.iter().all(|r| r.access_nodes == vec![24]));

    let areas: Vec<_> = records.iter().map(|r| r.geometry.unsigned_area()).collect();
    assert!(areas[0] >= areas[1] && areas[1] >= areas[2]);
    assert!(records[2].geometry.contains(&Point::new(0.003, 0.003)));
}

#[test]
fn single_band_at_zero_has_no_geometry() {
    let records = build_catchment(
        "Grid Station",
        &AccessPoints::from(AccessPoint::new(0.001, 0.001)),
        &IsoBands::from(0.0),
        &CatchmentConfig::default(),
        &street_grid(3),
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].geometry.0.is_empty());
}

#[test]
fn steep_terrain_shrinks_slope_adjusted_catchments() {
    let grid = street_grid(9);
    let config = CatchmentConfig::from_toml_str(
        r#"
        [speed]
        mode = "slope"
        max_speed_mps = 1.5
        "#,
    )
    .unwrap();
    let point = [AccessPoint::new(0.004, 0.004)];

    let flat = enrich_with_elevation(&grid, &Tilted(0.0)).unwrap();
    let steep = enrich_with_elevation(&grid, &Tilted(50_000.0)).unwrap();

    let flat_records = build_catchment("flat", &point, &[5.0], &config, &flat).unwrap();
    let steep_records = build_catchment("steep", &point, &[5.0], &config, &steep).unwrap();

    assert!(
        steep_records[0].geometry.unsigned_area() < flat_records[0].geometry.unsigned_area()
    );

    // the raw grid has no grades
    assert!(matches!(
        build_catchment("raw", &point, &[5.0], &config, &grid),
        Err(Error::MissingGradeAttribute { .. })
    ));
}

#[test]
fn node_catchments_match_iso_bands() {
    let network = assign_costs(&street_grid(9), &SpeedProfile::default()).unwrap();
    let sources = network
        .nearest_nodes(&[AccessPoint::new(0.004, 0.004)])
        .unwrap();
    let bands = [3.0, 6.0];

    let catchments = node_catchments(&network, &sources, &bands).unwrap();
    for band in bands {
        let subgraph = reachable_subgraph(&network, &sources, band).unwrap();
        let within: BTreeSet<_> = catchments
            .iter()
            .filter(|(_, b)| **b <= band)
            .map(|(id, _)| *id)
            .collect();
        let reached: BTreeSet<_> = subgraph
            .node_indices()
            .map(|node| network.node(node).unwrap().id)
            .collect();
        assert_eq!(within, reached);
    }
}

#[test]
fn geojson_export_keeps_record_order() {
    let records = build_catchment(
        "Grid Station",
        &[AccessPoint::new(0.002, 0.002)],
        &[5.0, 10.0],
        &CatchmentConfig::default(),
        &street_grid(5),
    )
    .unwrap();

    let json = records_to_geojson_string(&records).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let features = value["features"].as_array().unwrap();

    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["properties"]["iso_band"], 10.0);
    assert_eq!(features[1]["properties"]["iso_band"], 5.0);
    assert_eq!(features[0]["properties"]["location_name"], "Grid Station");
    assert_eq!(features[0]["geometry"]["type"], "MultiPolygon");
}
