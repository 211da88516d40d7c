//! XLSX reading via calamine. First sheet only; the first row supplies the
//! column headers.

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::{Map, Value};
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{ReadError, ReadResult};
use crate::format::Format;

/// Read the first sheet of an XLSX workbook into a [`Dataset`].
pub fn read(path: &Path) -> ReadResult<Dataset> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| parse_error(path, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| parse_error(path, "workbook has no sheets".to_string()))?
        .map_err(|e| parse_error(path, e.to_string()))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| ReadError::EmptyFile(path.to_path_buf()))?;
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(cell, i))
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::NoHeaders(path.to_path_buf()));
    }

    let mut dataset = Dataset::with_columns(headers.clone());
    for cells in rows {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(cells) {
            row.insert(header.clone(), cell_to_value(cell));
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("column{}", index + 1),
        Data::String(s) if s.trim().is_empty() => format!("column{}", index + 1),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Value::from(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

fn parse_error(path: &Path, message: String) -> ReadError {
    ReadError::Parse {
        path: path.to_path_buf(),
        expected: Format::Xlsx,
        message,
    }
}
