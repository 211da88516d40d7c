//! CSV reading with dialect and encoding auto-detection.

use serde_json::Map;
use std::fs;
use std::path::Path;

use crate::dataset::{infer_scalar, Dataset};
use crate::dialect::{self, CsvDialect};
use crate::error::{ReadError, ReadResult};
use crate::format::Format;
use crate::logs::log_info;

/// Read a CSV file into a [`Dataset`].
///
/// Dialect detection runs first and may normalize a semicolon delimiter in
/// place (see [`dialect::detect`]); the parse then always sees the
/// canonical delimiter.
pub fn read(path: &Path) -> ReadResult<Dataset> {
    let detected = dialect::detect(path)?;
    log_info(format!(
        "Detected delimiter '{}', line endings: {}",
        detected.delimiter_byte() as char,
        detected.line_ending
    ));

    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ReadError::EmptyFile(path.to_path_buf()));
    }

    let encoding = dialect::detect_encoding(&bytes);
    let content = dialect::decode(&bytes, &encoding);
    read_str(&content, &detected, path)
}

fn read_str(content: &str, dialect: &CsvDialect, path: &Path) -> ReadResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter_byte())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::NoHeaders(path.to_path_buf()));
    }

    let mut dataset = Dataset::with_columns(headers.clone());
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(path, e))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let mut row = Map::new();
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), infer_scalar(record.get(i).unwrap_or("")));
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

fn parse_error(path: &Path, error: csv::Error) -> ReadError {
    ReadError::Parse {
        path: path.to_path_buf(),
        expected: Format::Csv,
        message: error.to_string(),
    }
}
