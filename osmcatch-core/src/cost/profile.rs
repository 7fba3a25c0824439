use log::{info, warn};
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::speed::{SpeedUnit, irmischer_clarke_speed, validate_max_speed};
use crate::model::streets::{StreetEdge, WalkEdge};
use crate::{
    DEFAULT_MAX_WALK_SPEED_MPS, DEFAULT_WALK_SPEED_KMH, Error, MIN_EDGE_WALK_TIME, StreetGraph,
    WalkNetwork, WalkTime,
};

/// How fast pedestrians move along an edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpeedProfile {
    /// Constant speed on every edge
    Flat {
        #[serde(default = "default_walk_speed")]
        speed: f64,
        #[serde(default)]
        unit: SpeedUnit,
    },
    /// Speed derived from each edge's grade, requires grade on every edge
    #[serde(rename = "slope")]
    SlopeAdjusted {
        #[serde(default = "default_max_walk_speed")]
        max_speed_mps: f64,
    },
}

fn default_walk_speed() -> f64 {
    DEFAULT_WALK_SPEED_KMH
}

fn default_max_walk_speed() -> f64 {
    DEFAULT_MAX_WALK_SPEED_MPS
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self::Flat {
            speed: DEFAULT_WALK_SPEED_KMH,
            unit: SpeedUnit::KilometersPerHour,
        }
    }
}

impl SpeedProfile {
    pub fn flat_kmh(speed: f64) -> Self {
        Self::Flat {
            speed,
            unit: SpeedUnit::KilometersPerHour,
        }
    }

    pub fn slope_adjusted(max_speed_mps: f64) -> Self {
        Self::SlopeAdjusted { max_speed_mps }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidSpeed`] for non-positive or non-finite speeds,
    /// and for a gradient maximum speed not above 1 m/s
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Self::Flat { speed, .. } => {
                if speed.is_finite() && speed > 0.0 {
                    Ok(())
                } else {
                    Err(Error::InvalidSpeed(speed))
                }
            }
            Self::SlopeAdjusted { max_speed_mps } => validate_max_speed(max_speed_mps),
        }
    }

    /// Fastest speed this profile can produce, in meters per minute
    pub fn max_meters_per_minute(&self) -> f64 {
        match *self {
            Self::Flat { speed, unit } => unit.to_meters_per_second(speed) * 60.0,
            Self::SlopeAdjusted { max_speed_mps } => max_speed_mps * 60.0,
        }
    }

    fn meters_per_minute(&self, edge: EdgeIndex, weight: &StreetEdge) -> Result<f64, Error> {
        match *self {
            Self::Flat { speed, unit } => Ok(unit.to_meters_per_second(speed) * 60.0),
            Self::SlopeAdjusted { max_speed_mps } => {
                let grade = weight
                    .grade
                    .filter(|g| g.is_finite())
                    .ok_or(Error::MissingGradeAttribute { edge: edge.index() })?;
                Ok(irmischer_clarke_speed(grade * 100.0, max_speed_mps) * 60.0)
            }
        }
    }

    /// Walking time of one edge in minutes, `None` if the edge cannot be walked
    fn walk_time(&self, edge: EdgeIndex, weight: &StreetEdge) -> Result<Option<WalkTime>, Error> {
        if !weight.length.is_finite() || weight.length < 0.0 {
            warn!(
                "Excluding edge {} with invalid length {}",
                edge.index(),
                weight.length
            );
            return Ok(None);
        }
        let speed = self.meters_per_minute(edge, weight)?;
        if weight.length == 0.0 {
            return Ok(Some(MIN_EDGE_WALK_TIME));
        }

        let walk_time = weight.length / speed;
        if !walk_time.is_finite() || walk_time <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Edge {} has walk time {walk_time} at {speed} m/min",
                edge.index()
            )));
        }

        Ok(Some(walk_time.max(MIN_EDGE_WALK_TIME)))
    }
}

/// Derives a walk network from a street graph
///
/// Every edge gets `length / speed` minutes of walking time. Edges with a
/// negative or undefined length are dropped, zero-length edges cost
/// [`MIN_EDGE_WALK_TIME`]. The input graph is left untouched, so costing the
/// same graph again gives identical walk times.
///
/// # Errors
///
/// Fails on an invalid profile, and with [`Error::MissingGradeAttribute`]
/// when a slope-adjusted profile meets an edge without grade
pub fn assign_costs(graph: &StreetGraph, profile: &SpeedProfile) -> Result<WalkNetwork, Error> {
    profile.validate()?;

    let walk_times = graph
        .graph
        .edge_references()
        .map(|edge| profile.walk_time(edge.id(), edge.weight()))
        .collect::<Result<Vec<_>, _>>()?;

    let costed = graph.graph.filter_map(
        |_, node| Some(node.clone()),
        |idx, edge| {
            walk_times[idx.index()].map(|walk_time| WalkEdge {
                key: edge.key,
                length: edge.length,
                grade: edge.grade,
                walk_time,
                geometry: edge.geometry.clone(),
            })
        },
    );

    let excluded = graph.edge_count() - costed.edge_count();
    info!(
        "Assigned walk times to {} edges ({excluded} excluded)",
        costed.edge_count()
    );

    Ok(WalkNetwork::new(costed))
}
