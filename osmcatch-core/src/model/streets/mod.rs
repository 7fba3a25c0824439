//! Pedestrian street network model

pub mod components;
pub mod network;
pub mod walk_network;

pub use components::{StreetEdge, StreetNode, WalkEdge};
pub use network::StreetGraph;
pub use walk_network::{IndexedPoint, WalkNetwork};
