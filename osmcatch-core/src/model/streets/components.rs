//! Street network components - nodes and edges, raw and costed

use geo::{LineString, Point};

use crate::{OsmNodeId, WalkTime};

/// Street graph node
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
    /// Elevation in meters, if terrain data was attached
    pub elevation: Option<f64>,
}

impl StreetNode {
    pub fn new(id: OsmNodeId, geometry: Point<f64>) -> Self {
        Self {
            id,
            geometry,
            elevation: None,
        }
    }
}

/// Street graph edge (street segment) as delivered by the network source
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    /// Distinguishes parallel edges between the same ordered node pair
    pub key: u32,
    /// Physical length in meters
    pub length: f64,
    /// Signed rise over run, present once elevations were added
    pub grade: Option<f64>,
    /// Segment geometry, empty when the segment is a straight line
    pub geometry: LineString<f64>,
}

impl StreetEdge {
    pub fn new(key: u32, length: f64) -> Self {
        Self {
            key,
            length,
            grade: None,
            geometry: LineString::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: LineString<f64>) -> Self {
        self.geometry = geometry;
        self
    }

    /// Same segment traversed in the opposite direction
    pub(crate) fn reversed(&self) -> Self {
        let mut coords = self.geometry.0.clone();
        coords.reverse();
        Self {
            key: self.key,
            length: self.length,
            grade: self.grade.map(|g| -g),
            geometry: LineString::new(coords),
        }
    }
}

/// Street segment with its pedestrian traversal cost
#[derive(Debug, Clone, PartialEq)]
pub struct WalkEdge {
    pub key: u32,
    pub length: f64,
    pub grade: Option<f64>,
    /// Walking time in minutes, always finite and positive
    pub walk_time: WalkTime,
    pub geometry: LineString<f64>,
}

impl WalkEdge {
    pub fn walk_time(&self) -> WalkTime {
        self.walk_time
    }
}
