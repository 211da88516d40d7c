//! Per-format writers serializing a [`Dataset`] to disk.
//!
//! Column order is preserved in every target format; no implicit sorting.

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;
pub mod xml;

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{WriteError, WriteResult};
use crate::format::Format;

/// Serialize a dataset to `path` in the given format.
pub fn write_file(dataset: &Dataset, path: &Path, format: Format) -> WriteResult<()> {
    match format {
        Format::Csv => csv::write(dataset, path),
        Format::Xml => xml::write(dataset, path),
        Format::Json => json::write(dataset, path),
        Format::Markdown => markdown::write(dataset, path),
        Format::Html => html::write(dataset, path),
        Format::Xlsx => Err(WriteError::UnsupportedTarget(Format::Xlsx)),
    }
}
