//! Street network acquisition from an external map data provider

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use crate::algo::catchment::validate_bands;
use crate::cost::SpeedProfile;
use crate::{AccessPoint, Error, StreetGraph, WalkTime};

/// Margin applied on top of the farthest walkable distance when fetching
const NETWORK_EXTENT_FACTOR: f64 = 1.1;

/// Tag categories that make up the pedestrian network
///
/// They are OR-ed together, which map providers typically express as one
/// query per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkTagFilter {
    /// Highways open to pedestrians
    Highways,
    /// Dedicated footways
    Footways,
}

impl WalkTagFilter {
    pub const ALL: [Self; 2] = [Self::Highways, Self::Footways];

    /// Overpass QL tag filter for this category
    pub fn overpass_filter(self) -> &'static str {
        match self {
            Self::Highways => concat!(
                r#"["area"!~"yes"]["highway"]"#,
                r#"["highway"!~"motorway"]"#,
                r#"["highway"!~"motorway_junction"]"#,
                r#"["highway"!~"traffic_signals"]["highway"!~"give_way"]"#,
                r#"["foot"!~"no"]"#,
                r#"["sidewalk"!~"no|separate"]["area"!~"yes"]"#,
            ),
            Self::Footways => r#"["area"!~"yes"]["footway"]"#,
        }
    }
}

/// One request to a network source
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkQuery {
    pub center: AccessPoint,
    /// Keep streets within this many meters of `center`
    pub distance_m: f64,
    pub filter: WalkTagFilter,
    /// Fetch the network as it was at this instant
    pub snapshot: Option<DateTime<Utc>>,
}

impl NetworkQuery {
    /// Overpass settings header, including the snapshot date if any
    pub fn overpass_settings(&self) -> String {
        match &self.snapshot {
            Some(date) => format!(r#"[out:json][date:"{}"]"#, date.format("%Y-%m-%dT%H:%M:%SZ")),
            None => "[out:json]".to_string(),
        }
    }
}

/// Result of a successful query
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Network(StreetGraph),
    /// The provider answered, and nothing matches the query
    ConfirmedEmpty,
}

/// Provider of street networks, e.g. an Overpass API client
pub trait NetworkSource {
    /// # Errors
    ///
    /// Any failure to obtain an answer (network, parsing, provider errors).
    /// An empty but valid answer must be reported as
    /// [`FetchOutcome::ConfirmedEmpty`] instead.
    fn fetch(&self, query: &NetworkQuery) -> Result<FetchOutcome, Error>;
}

/// Fetches the walk network around every access point and merges it
///
/// One query is issued per access point and [`WalkTagFilter`]. Confirmed
/// empty answers are skipped, any error aborts the whole load so no catchment
/// is ever built from a partial network.
///
/// # Errors
///
/// Propagates source errors unchanged, returns [`Error::EmptyAccessPoints`]
/// for no points and [`Error::EmptyGraph`] if every query came back empty
pub fn load_walk_network<S>(
    source: &S,
    points: &[AccessPoint],
    distance_m: f64,
    snapshot: Option<DateTime<Utc>>,
) -> Result<StreetGraph, Error>
where
    S: NetworkSource + ?Sized,
{
    if points.is_empty() {
        return Err(Error::EmptyAccessPoints);
    }
    if !distance_m.is_finite() || distance_m <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Network distance must be positive, got {distance_m}"
        )));
    }

    let mut parts = Vec::with_capacity(points.len() * WalkTagFilter::ALL.len());
    for &center in points {
        for filter in WalkTagFilter::ALL {
            let query = NetworkQuery {
                center,
                distance_m,
                filter,
                snapshot,
            };
            trace!("Fetching {filter:?} within {distance_m} m of {center:?}");

            match source.fetch(&query)? {
                FetchOutcome::Network(graph) => parts.push(graph),
                FetchOutcome::ConfirmedEmpty => {
                    debug!("No {filter:?} within {distance_m} m of {center:?}");
                }
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let graph = StreetGraph::compose(parts);
    info!(
        "Loaded walk network with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Radius in meters to fetch around access points so the largest band fits
///
/// The farthest walkable distance at the profile's top speed plus a 10%
/// margin, rounded to the meter.
///
/// # Errors
///
/// Returns an error for invalid bands or an invalid profile
pub fn network_extent(bands: &[WalkTime], profile: &SpeedProfile) -> Result<f64, Error> {
    validate_bands(bands)?;
    profile.validate()?;

    let max_band = bands.iter().copied().fold(0.0, f64::max);
    Ok((max_band * profile.max_meters_per_minute() * NETWORK_EXTENT_FACTOR).round())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;

    use super::*;
    use crate::loading::StreetGraphBuilder;

    /// Serves a tiny graph around every center, footways only where allowed
    struct FakeSource {
        footways_at: Vec<AccessPoint>,
        fail_on: Option<WalkTagFilter>,
        queries: RefCell<Vec<NetworkQuery>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                footways_at: Vec::new(),
                fail_on: None,
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl NetworkSource for FakeSource {
        fn fetch(&self, query: &NetworkQuery) -> Result<FetchOutcome, Error> {
            self.queries.borrow_mut().push(query.clone());
            if self.fail_on == Some(query.filter) {
                return Err(Error::Source("overpass timeout".to_string()));
            }

            let AccessPoint { lat, lng } = query.center;
            #[allow(clippy::cast_possible_truncation)]
            let base = (lat * 1e4).round() as i64 * 10;
            let mut builder = StreetGraphBuilder::new();
            match query.filter {
                WalkTagFilter::Highways => {
                    builder.add_node(base, lat, lng).add_node(base + 1, lat, lng + 0.001);
                    builder.add_two_way_segment(base, base + 1)?;
                }
                WalkTagFilter::Footways => {
                    if !self.footways_at.contains(&query.center) {
                        return Ok(FetchOutcome::ConfirmedEmpty);
                    }
                    builder.add_node(base, lat, lng).add_node(base + 2, lat + 0.001, lng);
                    builder.add_two_way_segment(base, base + 2)?;
                }
            }
            Ok(FetchOutcome::Network(builder.build()))
        }
    }

    #[test]
    fn composes_every_point_and_filter() {
        let a = AccessPoint::new(-41.2883, 174.7750);
        let b = AccessPoint::new(-41.2889, 174.7748);
        let mut source = FakeSource::new();
        source.footways_at.push(a);

        let graph = load_walk_network(&source, &[a, b], 500.0, None).unwrap();

        assert_eq!(source.queries.borrow().len(), 4);
        // highways at a and b, plus the footway at a sharing its first node
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn confirmed_empty_everywhere_is_an_empty_graph() {
        struct Nothing;
        impl NetworkSource for Nothing {
            fn fetch(&self, _: &NetworkQuery) -> Result<FetchOutcome, Error> {
                Ok(FetchOutcome::ConfirmedEmpty)
            }
        }

        let result = load_walk_network(&Nothing, &[AccessPoint::new(0.0, 0.0)], 100.0, None);
        assert!(matches!(result, Err(Error::EmptyGraph)));
    }

    #[test]
    fn fetch_errors_are_propagated() {
        let mut source = FakeSource::new();
        source.fail_on = Some(WalkTagFilter::Footways);

        let result = load_walk_network(&source, &[AccessPoint::new(0.0, 0.0)], 100.0, None);
        match result {
            Err(Error::Source(message)) => assert_eq!(message, "overpass timeout"),
            other => panic!("expected source error, got {other:?}"),
        }
    }

    #[test]
    fn queries_carry_snapshot_and_distance() {
        let source = FakeSource::new();
        let snapshot = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        load_walk_network(&source, &[AccessPoint::new(0.0, 0.0)], 250.0, Some(snapshot)).unwrap();

        let queries = source.queries.borrow();
        assert!(queries.iter().all(|q| q.distance_m == 250.0));
        assert_eq!(
            queries[0].overpass_settings(),
            r#"[out:json][date:"2021-06-01T12:00:00Z"]"#
        );
    }

    #[test]
    fn no_points_is_rejected() {
        let source = FakeSource::new();
        assert!(matches!(
            load_walk_network(&source, &[], 100.0, None),
            Err(Error::EmptyAccessPoints)
        ));
    }

    #[test]
    fn extent_covers_largest_band() {
        // 4.8 km/h = 80 m/min, 10 minutes, 10% margin
        let extent = network_extent(&[5.0, 10.0], &SpeedProfile::default()).unwrap();
        assert_eq!(extent, 880.0);

        let slope = network_extent(&[10.0], &SpeedProfile::slope_adjusted(1.5)).unwrap();
        assert_eq!(slope, 990.0);
    }

    #[test]
    fn filters_exclude_areas() {
        for filter in WalkTagFilter::ALL {
            assert!(filter.overpass_filter().starts_with(r#"["area"!~"yes"]"#));
        }
    }
}
