//! Access points and the per-band catchment records

use std::ops::Deref;

use geo::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};

use crate::{OsmNodeId, WalkTime};

/// Entrance to a facility, given as latitude/longitude in WGS84
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub lat: f64,
    pub lng: f64,
}

impl AccessPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Point with x = longitude, y = latitude
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

/// `(lat, lng)` tuple, the order used by map providers
impl From<(f64, f64)> for AccessPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// One or more access points, normalized at the API boundary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessPoints(Vec<AccessPoint>);

impl Deref for AccessPoints {
    type Target = [AccessPoint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<AccessPoint> for AccessPoints {
    fn from(point: AccessPoint) -> Self {
        Self(vec![point])
    }
}

impl From<(f64, f64)> for AccessPoints {
    fn from(point: (f64, f64)) -> Self {
        Self(vec![point.into()])
    }
}

impl From<Vec<AccessPoint>> for AccessPoints {
    fn from(points: Vec<AccessPoint>) -> Self {
        Self(points)
    }
}

impl From<&[AccessPoint]> for AccessPoints {
    fn from(points: &[AccessPoint]) -> Self {
        Self(points.to_vec())
    }
}

impl From<Vec<(f64, f64)>> for AccessPoints {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self(points.into_iter().map(AccessPoint::from).collect())
    }
}

/// One or more iso bands in minutes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoBands(Vec<WalkTime>);

impl Deref for IsoBands {
    type Target = [WalkTime];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<WalkTime> for IsoBands {
    fn from(band: WalkTime) -> Self {
        Self(vec![band])
    }
}

impl From<Vec<WalkTime>> for IsoBands {
    fn from(bands: Vec<WalkTime>) -> Self {
        Self(bands)
    }
}

impl From<&[WalkTime]> for IsoBands {
    fn from(bands: &[WalkTime]) -> Self {
        Self(bands.to_vec())
    }
}

impl<const N: usize> From<[WalkTime; N]> for IsoBands {
    fn from(bands: [WalkTime; N]) -> Self {
        Self(bands.to_vec())
    }
}

/// Walk catchment of one iso band
#[derive(Debug, Clone, PartialEq)]
pub struct CatchmentRecord {
    /// Name of the location, for reference only
    pub location_name: String,
    pub access_points: Vec<AccessPoint>,
    /// OSM ids of the nodes nearest to each access point, in access point order
    pub access_nodes: Vec<OsmNodeId>,
    /// Travel time budget in minutes
    pub iso_band: WalkTime,
    /// Buffered walkshed in WGS84, empty when no street was traversed
    pub geometry: MultiPolygon<f64>,
}
