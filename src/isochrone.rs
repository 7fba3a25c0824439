use osmcatch_core::prelude::*;
use pyo3::prelude::*;

use crate::network::{PyWalkNetwork, to_py_err};
use crate::records_to_wkt;

fn build_records(
    network: &PyWalkNetwork,
    location_name: &str,
    access_points: Vec<(f64, f64)>,
    bands: Vec<f64>,
    buffer_meters: Option<f64>,
) -> PyResult<Vec<CatchmentRecord>> {
    let access_points = AccessPoints::from(access_points);
    let bands = IsoBands::from(bands);
    network
        .network
        .iso_bands(
            location_name,
            &access_points,
            &bands,
            buffer_meters.unwrap_or(network.buffer_meters),
        )
        .map_err(|e| to_py_err("Failed to calculate catchments", e))
}

/// Walk catchments around the access points, one per band in minutes
///
/// Returns a list of `(iso_band, wkt)` pairs in descending band order.
#[pyfunction]
#[pyo3(signature = (network, location_name, access_points, bands, buffer_meters = None))]
pub fn iso_bands(
    py: Python<'_>,
    network: &PyWalkNetwork,
    location_name: &str,
    access_points: Vec<(f64, f64)>,
    bands: Vec<f64>,
    buffer_meters: Option<f64>,
) -> PyResult<Vec<(f64, String)>> {
    py.allow_threads(|| {
        let records = build_records(network, location_name, access_points, bands, buffer_meters)?;
        Ok(records_to_wkt(&records))
    })
}

/// Same as `iso_bands`, as a GeoJSON FeatureCollection string
#[pyfunction]
#[pyo3(signature = (network, location_name, access_points, bands, buffer_meters = None))]
pub fn iso_bands_geojson(
    py: Python<'_>,
    network: &PyWalkNetwork,
    location_name: &str,
    access_points: Vec<(f64, f64)>,
    bands: Vec<f64>,
    buffer_meters: Option<f64>,
) -> PyResult<String> {
    py.allow_threads(|| {
        let records = build_records(network, location_name, access_points, bands, buffer_meters)?;
        records_to_geojson_string(&records).map_err(|e| to_py_err("Failed to export GeoJSON", e))
    })
}
