//! Capability matrix: which (input, output) format pairs are convertible.
//!
//! Each supported pair maps to the reader and writer functions that
//! together perform the conversion. Pairs absent from the table are
//! rejected up front, before any file is touched.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::dataset::Dataset;
use crate::error::{ReadResult, WriteResult};
use crate::format::Format;
use crate::{reader, writer};

// ============================================================================
// Types
// ============================================================================

/// Reads a file of a known format into a dataset.
pub type ReaderFn = fn(&Path) -> ReadResult<Dataset>;

/// Writes a dataset to a file of a known format.
pub type WriterFn = fn(&Dataset, &Path) -> WriteResult<()>;

/// A supported conversion: how to read the input and write the output.
#[derive(Clone, Copy)]
pub struct Capability {
    pub reader: ReaderFn,
    pub writer: WriterFn,
}

// ============================================================================
// Matrix
// ============================================================================

static CAPABILITIES: Lazy<HashMap<(Format, Format), Capability>> = Lazy::new(|| {
    use Format::*;

    let mut table: HashMap<(Format, Format), Capability> = HashMap::new();
    let mut add = |input: Format, output: Format, reader: ReaderFn, writer: WriterFn| {
        table.insert((input, output), Capability { reader, writer });
    };

    add(Csv, Xml, reader::csv::read, writer::xml::write);
    add(Csv, Json, reader::csv::read, writer::json::write);
    add(Csv, Markdown, reader::csv::read, writer::markdown::write);
    add(Csv, Html, reader::csv::read, writer::html::write);

    add(Xml, Csv, reader::xml::read, writer::csv::write);
    add(Xml, Json, reader::xml::read, writer::json::write);
    add(Xml, Markdown, reader::xml::read, writer::markdown::write);
    add(Xml, Html, reader::xml::read, writer::html::write);

    add(Json, Csv, reader::json::read, writer::csv::write);
    add(Json, Xml, reader::json::read, writer::xml::write);
    add(Json, Markdown, reader::json::read, writer::markdown::write);
    add(Json, Html, reader::json::read, writer::html::write);

    add(Xlsx, Csv, reader::xlsx::read, writer::csv::write);
    add(Xlsx, Json, reader::xlsx::read, writer::json::write);
    add(Xlsx, Xml, reader::xlsx::read, writer::xml::write);
    add(Xlsx, Markdown, reader::xlsx::read, writer::markdown::write);
    add(Xlsx, Html, reader::xlsx::read, writer::html::write);

    table
});

/// Look up the capability for a conversion pair, if supported.
pub fn lookup(input: Format, output: Format) -> Option<&'static Capability> {
    CAPABILITIES.get(&(input, output))
}

/// All supported (input, output) pairs, sorted for stable display.
pub fn supported_pairs() -> Vec<(Format, Format)> {
    let mut pairs: Vec<(Format, Format)> = CAPABILITIES.keys().copied().collect();
    pairs.sort();
    pairs
}
