use rayon::prelude::*;
use wkt::ToWkt;

use osmcatch_core::CatchmentRecord;

/// Walkshed of a record as a WKT `MULTIPOLYGON`
pub fn record_to_wkt(record: &CatchmentRecord) -> String {
    record.geometry.wkt_string()
}

/// `(iso_band, wkt)` for every record, in record order
pub fn records_to_wkt(records: &[CatchmentRecord]) -> Vec<(f64, String)> {
    records
        .par_iter()
        .map(|record| (record.iso_band, record_to_wkt(record)))
        .collect()
}
