//! This module is responsible for getting street networks into shape for
//! catchment analysis: building graphs, fetching them from map data
//! providers, attaching terrain and reading configuration.

mod builder;
mod config;
mod elevation;
mod source;

pub use builder::StreetGraphBuilder;
pub use config::{CatchmentConfig, WalkDirection};
pub use elevation::{ElevationSource, add_edge_grades, enrich_with_elevation};
pub use source::{
    FetchOutcome, NetworkQuery, NetworkSource, WalkTagFilter, load_walk_network, network_extent,
};
