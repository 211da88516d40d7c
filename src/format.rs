//! File format identification.
//!
//! A [`Format`] is derived solely from a file's extension, lower-cased and
//! stripped of the leading dot. An empty or absent extension is a distinct
//! error, never silently treated as a real format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::FormatError;

/// A file format the engine knows about.
///
/// Knowing about a format does not imply it can be read or written; the
/// capability table is the single source of truth for supported conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Xml,
    Json,
    Xlsx,
    Markdown,
    Html,
}

impl Format {
    /// Map an extension (with or without the leading dot) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            "xlsx" => Some(Self::Xlsx),
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Derive the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        if ext.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        Self::from_extension(&ext).ok_or(FormatError::UnknownExtension(ext.to_lowercase()))
    }

    /// Whether files of this format are plain text. XLSX is a zip archive
    /// and must never go through byte-for-character rewrites.
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Xlsx)
    }

    /// Canonical extension used when naming output files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "CSV",
            Self::Xml => "XML",
            Self::Json => "JSON",
            Self::Xlsx => "XLSX",
            Self::Markdown => "MD",
            Self::Html => "HTML",
        };
        f.write_str(name)
    }
}
