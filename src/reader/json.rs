//! JSON reading: array-of-objects or object-of-arrays.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{ReadError, ReadResult};
use crate::format::Format;

/// Read a JSON file into a [`Dataset`].
pub fn read(path: &Path) -> ReadResult<Dataset> {
    let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(ReadError::EmptyFile(path.to_path_buf()));
    }
    let value: Value =
        serde_json::from_str(&content).map_err(|e| parse_error(path, e.to_string()))?;
    from_value(value, path)
}

fn from_value(value: Value, path: &Path) -> ReadResult<Dataset> {
    match value {
        Value::Array(items) => from_records(items, path),
        Value::Object(columns) => from_columns(columns, path),
        _ => Err(parse_error(
            path,
            "expected an array of objects or an object of arrays".to_string(),
        )),
    }
}

fn from_records(items: Vec<Value>, path: &Path) -> ReadResult<Dataset> {
    let mut dataset = Dataset::new();
    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(parse_error(
                path,
                format!("record {index} is not an object"),
            ));
        };
        let mut row = Map::new();
        for (key, value) in object {
            row.insert(key, check_scalar(value, path)?);
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

fn from_columns(columns: Map<String, Value>, path: &Path) -> ReadResult<Dataset> {
    let mut column_data: Vec<(String, Vec<Value>)> = Vec::new();
    let mut row_count = 0;
    for (name, value) in columns {
        let Value::Array(cells) = value else {
            return Err(parse_error(
                path,
                format!("column '{name}' is not an array"),
            ));
        };
        let cells: Vec<Value> = cells
            .into_iter()
            .map(|cell| check_scalar(cell, path))
            .collect::<ReadResult<_>>()?;
        row_count = row_count.max(cells.len());
        column_data.push((name, cells));
    }

    let mut dataset = Dataset::with_columns(column_data.iter().map(|(name, _)| name.clone()));
    for index in 0..row_count {
        let mut row = Map::new();
        for (name, cells) in &column_data {
            row.insert(
                name.clone(),
                cells.get(index).cloned().unwrap_or(Value::Null),
            );
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

fn check_scalar(value: Value, path: &Path) -> ReadResult<Value> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value),
        Value::Array(_) | Value::Object(_) => Err(parse_error(
            path,
            "nested arrays or objects are not tabular".to_string(),
        )),
    }
}

fn parse_error(path: &Path, message: String) -> ReadError {
    ReadError::Parse {
        path: path.to_path_buf(),
        expected: Format::Json,
        message,
    }
}
