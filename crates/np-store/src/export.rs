//! CSV export of persisted segments.

use std::path::Path;

use serde::Serialize;

use crate::error::StoreResult;
use crate::store::DatasetStore;

#[derive(Serialize)]
struct SegmentRow<'a> {
    subnet_id: u32,
    node_a: String,
    node_b: String,
    weight: f64,
    is_existing: &'a str,
}

/// Write segments to a CSV file, optionally restricted to existing or
/// proposed ones. Returns the number of rows written.
pub fn save_segments_csv(
    store: &DatasetStore,
    path: &Path,
    is_existing: Option<bool>,
) -> StoreResult<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut rows = 0usize;
    for segment in store.iter_segments(is_existing) {
        writer.serialize(SegmentRow {
            subnet_id: segment.subnet_id,
            node_a: segment.a.to_string(),
            node_b: segment.b.to_string(),
            weight: segment.weight,
            is_existing: if segment.is_existing { "true" } else { "false" },
        })?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}
