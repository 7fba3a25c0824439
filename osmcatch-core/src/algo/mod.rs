pub mod catchment;
pub mod node_catchments;
pub mod reachability;
