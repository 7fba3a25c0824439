use thiserror::Error;

use crate::OsmNodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No access points provided")]
    EmptyAccessPoints,
    #[error("No iso bands provided")]
    EmptyBands,
    #[error("Invalid iso band: {0} (bands must be finite and non-negative)")]
    InvalidBand(f64),
    #[error("Unsupported speed unit '{0}', expected one of: m/s, km/h")]
    InvalidSpeedUnit(String),
    #[error("Invalid walking speed: {0} (must be finite and positive)")]
    InvalidSpeed(f64),
    #[error("Invalid iso buffer: {0} meters (must be finite and positive)")]
    InvalidBuffer(f64),
    #[error("Street graph has no nodes")]
    EmptyGraph,
    #[error("Node index {0} is not part of the street graph")]
    NodeNotFound(usize),
    #[error("Edge {edge} has no grade attribute, add elevations before using slope-adjusted speeds")]
    MissingGradeAttribute { edge: usize },
    #[error("Node {0} has no elevation")]
    MissingElevation(OsmNodeId),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Data source error: {0}")]
    Source(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
