//! Pedestrian walk catchments (isochrones) over street networks.
//!
//! The pipeline costs a street graph with walking time, snaps access points
//! to the nearest network nodes, grows cost-bounded reachability balls from
//! every access node and turns the traversed street segments into a buffered
//! polygon per time band.

pub mod algo;
pub mod cost;
pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod output;
pub mod prelude;
pub mod routing;

pub use error::Error;

pub use algo::catchment::build_catchment;
pub use model::{AccessPoint, CatchmentRecord, StreetGraph, WalkNetwork};

/// OSM identifier of a street node
pub type OsmNodeId = i64;

/// Walking time in minutes
pub type WalkTime = f64;

/// Lower bound on the walk time of a single edge (minutes).
///
/// Zero-length segments still cost something so the graph never contains
/// zero-cost cycles.
pub const MIN_EDGE_WALK_TIME: WalkTime = 0.001;

/// Default walking speed in km/h (400 m in 5 minutes)
pub const DEFAULT_WALK_SPEED_KMH: f64 = 4.8;

/// Default maximum walking speed in m/s for the gradient model
pub const DEFAULT_MAX_WALK_SPEED_MPS: f64 = 1.5;

/// Default buffer in meters around traversed edges
pub const DEFAULT_ISO_BUFFER_M: f64 = 25.0;
