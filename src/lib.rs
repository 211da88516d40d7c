//! # Dataconv - tabular file conversion and XML editing
//!
//! Dataconv converts tabular files between formats (CSV, XML, JSON,
//! XLSX, Markdown, HTML) and edits attributes of flat XML documents in
//! place.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Input File │────▶│   Reader    │────▶│   Dataset   │────▶│   Writer    │
//! │ (CSV..XLSX) │     │ (auto-enc)  │     │ (columnar)  │     │ (CSV..HTML) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Conversions are gated by the capability matrix; XML-bound runs wrap
//! the input in a space sentinel that is always undone, success or not.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let report = dataconv::convert(Path::new("in.csv"), Path::new("out.json"))?;
//! println!("{report}");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`format`] - File format identification
//! - [`capability`] - The supported-conversion matrix
//! - [`dataset`] - The in-memory tabular model
//! - [`dialect`] - CSV delimiter/encoding detection and normalization
//! - [`reader`] - Format readers
//! - [`writer`] - Format writers
//! - [`xml`] - XML document model and attribute editing
//! - [`convert`] - Conversion orchestration and the XML safety guard
//! - [`logs`] - Broadcast log channel

// Core modules
pub mod error;
pub mod format;

// Tabular model
pub mod capability;
pub mod dataset;

// Input
pub mod dialect;
pub mod reader;

// Output
pub mod writer;

// XML
pub mod xml;

// Orchestration
pub mod convert;
pub mod pathlock;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConvertError,
    DialectError,
    FormatError,
    ReadError,
    WriteError,
    XmlEditError,
    XmlParseError,
};

// =============================================================================
// Re-exports - Formats and capabilities
// =============================================================================

pub use capability::{lookup as capability_for, supported_pairs};
pub use format::Format;

// =============================================================================
// Re-exports - Dataset
// =============================================================================

pub use dataset::{infer_scalar, scalar_to_string, Dataset};

// =============================================================================
// Re-exports - Dialect
// =============================================================================

pub use dialect::{CsvDialect, LineEnding};

// =============================================================================
// Re-exports - Reading and writing
// =============================================================================

pub use reader::{read_file, read_with_columns};
pub use writer::write_file;

// =============================================================================
// Re-exports - Conversion
// =============================================================================

pub use convert::xmlsafe::XmlSafetyGuard;
pub use convert::{convert, Report};

// =============================================================================
// Re-exports - XML editing
// =============================================================================

pub use xml::edit::{add_attribute, delete_attribute, parse_summary, XmlSummary};
pub use xml::{XmlDocument, XmlElement};

// =============================================================================
// Re-exports - Logs
// =============================================================================

pub use logs::{log_error, log_info, log_success, log_warning, LogEntry, LogLevel};
