use osmcatch_core::prelude::*;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

/// Maps core errors to Python exceptions, `ValueError` for bad arguments
pub(crate) fn to_py_err(context: &str, error: Error) -> PyErr {
    match error {
        Error::EmptyAccessPoints
        | Error::EmptyBands
        | Error::InvalidBand(_)
        | Error::InvalidSpeedUnit(_)
        | Error::InvalidSpeed(_)
        | Error::InvalidBuffer(_)
        | Error::Config(_) => PyValueError::new_err(format!("{context}: {error}")),
        _ => PyRuntimeError::new_err(format!("{context}: {error}")),
    }
}

/// WalkNetwork
///
/// A street network costed with walking times, ready for catchment
/// computation. Created with `create_walk_network`.
#[pyclass(name = "WalkNetwork")]
pub struct PyWalkNetwork {
    pub(crate) network: WalkNetwork,
    pub(crate) buffer_meters: f64,
}

#[pymethods]
impl PyWalkNetwork {
    pub fn node_count(&self) -> usize {
        self.network.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.network.edge_count()
    }

    /// OSM id of the node nearest to `(lat, lng)`
    pub fn nearest_node(&self, lat: f64, lng: f64) -> PyResult<OsmNodeId> {
        let node = self
            .network
            .nearest_node(&AccessPoint::new(lat, lng))
            .map_err(|e| to_py_err("Failed to find nearest node", e))?;
        self.network
            .node(node)
            .map(|n| n.id)
            .ok_or_else(|| PyRuntimeError::new_err("Nearest node is not in the network"))
    }

    fn __repr__(&self) -> String {
        format!(
            "WalkNetwork with {} nodes and {} edges",
            self.network.node_count(),
            self.network.edge_count()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}

/// Create a walk network from street nodes and edges
///
/// Parameters
/// ----------
/// nodes : list[tuple[int, float, float, float | None]]
///     `(osm_id, lat, lng, elevation)` of every street node
/// edges : list[tuple[int, int, float | None]]
///     `(from_id, to_id, length_m)`; a missing length is measured as the
///     great-circle distance between the endpoints
/// config : str, optional
///     TOML catchment configuration (speed profile, buffer, walk direction)
///
/// Returns
/// -------
/// WalkNetwork
///
/// Raises
/// ------
/// ValueError
///     If the configuration is invalid
/// RuntimeError
///     If the network cannot be built or costed, e.g. slope-adjusted speeds
///     without elevations
#[pyfunction]
#[pyo3(signature = (nodes, edges, config = None))]
pub fn create_walk_network(
    py: Python<'_>,
    nodes: Vec<(OsmNodeId, f64, f64, Option<f64>)>,
    edges: Vec<(OsmNodeId, OsmNodeId, Option<f64>)>,
    config: Option<&str>,
) -> PyResult<PyWalkNetwork> {
    let config = match config {
        Some(source) => CatchmentConfig::from_toml_str(source)
            .map_err(|e| to_py_err("Invalid configuration", e))?,
        None => CatchmentConfig::default(),
    };

    py.allow_threads(|| {
        let mut builder = StreetGraphBuilder::new();
        let mut has_elevations = !nodes.is_empty();
        for (id, lat, lng, elevation) in nodes {
            match elevation {
                Some(elevation) => builder.add_node_with_elevation(id, lat, lng, elevation),
                None => {
                    has_elevations = false;
                    builder.add_node(id, lat, lng)
                }
            };
        }
        for (from, to, length) in edges {
            let result = match length {
                Some(length) => builder.add_edge(from, to, length),
                None => builder.add_segment(from, to),
            };
            result.map_err(|e| to_py_err("Invalid edge", e))?;
        }

        let mut graph = builder.build();
        if has_elevations {
            graph = add_edge_grades(&graph).map_err(|e| to_py_err("Failed to add grades", e))?;
        }
        if config.walk_direction == WalkDirection::Bidirectional {
            graph = graph.to_bidirectional();
        }

        let network = assign_costs(&graph, &config.speed)
            .map_err(|e| to_py_err("Failed to cost walk network", e))?;

        Ok(PyWalkNetwork {
            network,
            buffer_meters: config.buffer_meters,
        })
    })
}

/// Walking speed on a percentage gradient (Irmischer & Clarke)
#[pyfunction(name = "walk_speed_on_grade")]
#[pyo3(signature = (grade, max_speed = 1.5, unit = "km/h"))]
pub fn py_walk_speed_on_grade(grade: f64, max_speed: f64, unit: &str) -> PyResult<f64> {
    walk_speed_on_grade(grade, max_speed, unit)
        .map_err(|e| to_py_err("Failed to compute walking speed", e))
}

/// Walking speeds for a sequence of percentage gradients
#[pyfunction(name = "gradient_adjusted_walk_speed")]
#[pyo3(signature = (grades, max_speed = 1.5, unit = "km/h"))]
#[allow(clippy::needless_pass_by_value)]
pub fn py_gradient_adjusted_walk_speed(
    grades: Vec<f64>,
    max_speed: f64,
    unit: &str,
) -> PyResult<Vec<f64>> {
    gradient_adjusted_walk_speed(&grades, max_speed, unit)
        .map_err(|e| to_py_err("Failed to compute walking speeds", e))
}
