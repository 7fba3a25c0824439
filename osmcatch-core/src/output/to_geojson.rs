use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{CatchmentRecord, Error};

/// Converts a catchment record to a `GeoJSON` feature.
pub fn record_to_feature(record: &CatchmentRecord) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&record.geometry));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "location_name": record.location_name,
            "access_points": record.access_points,
            "access_nodes": record.access_nodes,
            "iso_band": record.iso_band,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Converts catchment records to a `GeoJSON` `FeatureCollection`, keeping
/// their order.
pub fn records_to_geojson(records: &[CatchmentRecord]) -> Result<FeatureCollection, Error> {
    let features = records
        .iter()
        .map(record_to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn records_to_geojson_string(records: &[CatchmentRecord]) -> Result<String, Error> {
    serde_json::to_string(&records_to_geojson(records)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}
