//! Pedestrian walk catchments over street networks.
//!
//! Re-exports the core library and adds WKT export. Python bindings are
//! available behind the `python` feature.

pub use osmcatch_core::prelude::*;
pub use osmcatch_core::{algo, cost, geometry, loading, model, output, routing};

mod export;

pub use export::{record_to_wkt, records_to_wkt};

#[cfg(feature = "python")]
mod isochrone;
#[cfg(feature = "python")]
mod network;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn osmcatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<network::PyWalkNetwork>()?;
    m.add_function(wrap_pyfunction!(network::create_walk_network, m)?)?;
    m.add_function(wrap_pyfunction!(network::py_walk_speed_on_grade, m)?)?;
    m.add_function(wrap_pyfunction!(network::py_gradient_adjusted_walk_speed, m)?)?;

    m.add_function(wrap_pyfunction!(isochrone::iso_bands, m)?)?;
    m.add_function(wrap_pyfunction!(isochrone::iso_bands_geojson, m)?)?;
    Ok(())
}
