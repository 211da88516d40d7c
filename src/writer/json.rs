//! JSON writing: pretty-printed array of objects, keys in column order.

use std::fs;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{WriteError, WriteResult};

/// Serialize a dataset as a JSON array of objects.
pub fn write(dataset: &Dataset, path: &Path) -> WriteResult<()> {
    let records: Vec<serde_json::Value> = dataset
        .rows()
        .iter()
        .cloned()
        .map(serde_json::Value::Object)
        .collect();
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
