mod to_geojson;

pub use to_geojson::{record_to_feature, records_to_geojson, records_to_geojson_string};
