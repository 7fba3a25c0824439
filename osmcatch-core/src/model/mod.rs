//! Data model for walk catchment computation
//!
//! Contains the street network types and the records produced for every
//! requested iso band.

pub mod catchment;
pub mod streets;

pub use catchment::{AccessPoint, AccessPoints, CatchmentRecord, IsoBands};
pub use streets::network::StreetGraph;
pub use streets::walk_network::WalkNetwork;
