pub use crate::MIN_EDGE_WALK_TIME;

// Re-export key components
pub use crate::algo::catchment::{build_catchment, validate_bands};
pub use crate::algo::node_catchments::node_catchments;
pub use crate::algo::reachability::{ReachableSubgraph, reachable_subgraph};
pub use crate::cost::{
    SpeedProfile, SpeedUnit, assign_costs, gradient_adjusted_walk_speed, walk_speed_on_grade,
};
pub use crate::geometry::{LocalProjection, geometrize};
pub use crate::loading::{
    CatchmentConfig, ElevationSource, FetchOutcome, NetworkQuery, NetworkSource,
    StreetGraphBuilder, WalkDirection, WalkTagFilter, add_edge_grades, enrich_with_elevation,
    load_walk_network, network_extent,
};
pub use crate::model::{
    AccessPoint, AccessPoints, CatchmentRecord, IsoBands, StreetGraph, WalkNetwork,
};
pub use crate::output::{record_to_feature, records_to_geojson, records_to_geojson_string};

// Core types for the street network
pub use crate::Error;
pub use crate::OsmNodeId;
pub use crate::WalkTime; // minutes
