//! Error types for the conversion engine.
//!
//! One enum per concern:
//!
//! - [`FormatError`] - file extension / format derivation errors
//! - [`DialectError`] - CSV dialect sampling and normalization errors
//! - [`XmlParseError`] - low-level XML tree parsing errors
//! - [`ReadError`] - tabular reading errors
//! - [`WriteError`] - tabular writing errors
//! - [`XmlEditError`] - XML attribute mutation errors
//! - [`ConvertError`] - top-level dispatcher errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error names the
//! failing path where one exists; none of them carry a raw internal error
//! string as the primary message.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

// =============================================================================
// Format Derivation Errors
// =============================================================================

/// Errors deriving a [`Format`] from a file path.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No path or no file extension supplied.
    #[error("no input path or file extension supplied")]
    EmptyInput,

    /// Extension present but not a known format.
    #[error("unrecognized file extension '.{0}'")]
    UnknownExtension(String),
}

// =============================================================================
// CSV Dialect Errors
// =============================================================================

/// Errors during CSV dialect sampling or delimiter normalization.
#[derive(Debug, Error)]
pub enum DialectError {
    /// Failed to read the detection sample.
    #[error("failed to sample '{path}': {source}")]
    Sample {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to rewrite the delimiter in place.
    #[error("failed to normalize delimiter in '{path}': {source}")]
    Rewrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// XML Tree Errors
// =============================================================================

/// Low-level errors parsing an XML document into a tree.
#[derive(Debug, Error)]
pub enum XmlParseError {
    /// Malformed XML syntax.
    #[error("{0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed attribute.
    #[error("{0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document contains no root element.
    #[error("document has no root element")]
    NoRoot,

    /// More than one top-level element.
    #[error("document has more than one root element")]
    MultipleRoots,
}

// =============================================================================
// Reading Errors
// =============================================================================

/// Errors reading a file into a [`Dataset`](crate::dataset::Dataset).
#[derive(Debug, Error)]
pub enum ReadError {
    /// Format could not be derived from the path.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Path does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Dialect detection failed.
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// Content does not match the shape its extension implies.
    #[error("'{path}' is not valid {expected}: {message}")]
    Parse {
        path: PathBuf,
        expected: Format,
        message: String,
    },

    /// Format exists but has no tabular reader.
    #[error("{0} files cannot be read as tabular data")]
    UnreadableFormat(Format),

    /// File exists but holds nothing.
    #[error("'{0}' is empty")]
    EmptyFile(PathBuf),

    /// No column headers found.
    #[error("no column headers found in '{0}'")]
    NoHeaders(PathBuf),

    /// Underlying I/O failure.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Writing Errors
// =============================================================================

/// Errors serializing a [`Dataset`](crate::dataset::Dataset) to disk.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Format exists but has no tabular writer.
    #[error("writing {0} files is not supported")]
    UnsupportedTarget(Format),

    /// CSV serialization failure.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    /// XML serialization failure.
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization failure.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// XML Mutation Errors
// =============================================================================

/// Errors from the XML attribute mutator.
///
/// Deleting an attribute that is absent on a matching element is benign and
/// is not represented here.
#[derive(Debug, Error)]
pub enum XmlEditError {
    /// Path does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Document is not well-formed XML.
    #[error("'{path}' is not well-formed XML: {message}")]
    Parse { path: PathBuf, message: String },

    /// Tree could not be serialized back to text.
    #[error("failed to serialize XML for '{path}': {message}")]
    Serialize { path: PathBuf, message: String },

    /// Failed to read the document.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to persist the mutated tree.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Dispatcher Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the main error type returned by [`crate::convert::convert`].
/// It wraps all lower-level errors and adds dispatcher-specific variants.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Format pair absent from the capability table. An expected outcome,
    /// reported before any file I/O is attempted.
    #[error("unsupported conversion: {input} to {output}")]
    Unsupported { input: Format, output: Format },

    /// Format derivation error.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Reading error.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// Writing error.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// The safety codec could not restore the input file. The source may be
    /// left with sentinel characters in place of spaces.
    #[error("failed to restore '{path}' after conversion: {source}")]
    Restore {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dialect detection.
pub type DialectResult<T> = Result<T, DialectError>;

/// Result type for tabular reading.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for tabular writing.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for XML mutation.
pub type XmlEditResult<T> = Result<T, XmlEditError>;

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;
