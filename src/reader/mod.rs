//! Per-format readers producing the canonical [`Dataset`].
//!
//! [`read_file`] is the public read entry point: it derives the format from
//! the path, serializes access to the file, dispatches to the matching
//! reader and reports the column list over the log channel.

pub mod csv;
pub mod json;
pub mod xlsx;
pub mod xml;

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{ReadError, ReadResult};
use crate::format::Format;
use crate::logs::log_info;
use crate::pathlock;

/// Read a file into a [`Dataset`], dispatching on its extension.
///
/// Fails with [`FormatError::EmptyInput`](crate::error::FormatError) before
/// any I/O when the path carries no extension.
pub fn read_file<P: AsRef<Path>>(path: P) -> ReadResult<Dataset> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    let lock = pathlock::lock_for(path);
    let _guard = pathlock::acquire(&lock);
    read_as(path, format)
}

/// Read a file and return the dataset together with its column names.
pub fn read_with_columns<P: AsRef<Path>>(path: P) -> ReadResult<(Dataset, Vec<String>)> {
    let dataset = read_file(path)?;
    let columns = dataset.columns().to_vec();
    Ok((dataset, columns))
}

/// Read a file as an already-derived format. Callers must hold the path's
/// lock (or know no concurrent access is possible).
pub fn read_as(path: &Path, format: Format) -> ReadResult<Dataset> {
    if !path.exists() {
        return Err(ReadError::FileNotFound(path.to_path_buf()));
    }
    let dataset = match format {
        Format::Csv => csv::read(path)?,
        Format::Xml => xml::read(path)?,
        Format::Json => json::read(path)?,
        Format::Xlsx => xlsx::read(path)?,
        Format::Markdown | Format::Html => return Err(ReadError::UnreadableFormat(format)),
    };
    log_info(format!(
        "Read {} rows, columns: {}",
        dataset.row_count(),
        dataset.columns().join(", ")
    ));
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_path_fails_before_io() {
        let err = read_file("").unwrap_err();
        assert!(matches!(err, ReadError::Format(_)));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = read_file("/nonexistent/data.csv").unwrap_err();
        assert!(matches!(err, ReadError::FileNotFound(_)));
    }

    #[test]
    fn test_markdown_has_no_reader() {
        let mut file = NamedTempFile::with_suffix(".md").unwrap();
        file.write_all(b"| a |\n| --- |\n| 1 |\n").unwrap();

        let err = read_file(file.path()).unwrap_err();
        assert!(matches!(err, ReadError::UnreadableFormat(Format::Markdown)));
    }

    #[test]
    fn test_dispatch_by_extension() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(br#"[{"a": 1}]"#).unwrap();

        let dataset = read_file(file.path()).unwrap();
        assert_eq!(dataset.columns(), &["a"]);
        assert_eq!(dataset.row_count(), 1);
    }
}
