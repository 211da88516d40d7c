//! HTML writing: a plain `<table>` with thead/tbody.

use std::fs;
use std::path::Path;

use crate::dataset::{scalar_to_string, Dataset};
use crate::error::{WriteError, WriteResult};

/// Serialize a dataset as an HTML table.
pub fn write(dataset: &Dataset, path: &Path) -> WriteResult<()> {
    fs::write(path, serialize(dataset)).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the table as a string.
pub fn serialize(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str("<table>\n  <thead>\n    <tr>\n");
    for column in dataset.columns() {
        out.push_str("      <th>");
        out.push_str(&escape_text(column));
        out.push_str("</th>\n");
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in dataset.rows() {
        out.push_str("    <tr>\n");
        for column in dataset.columns() {
            let text =
                scalar_to_string(row.get(column).unwrap_or(&serde_json::Value::Null));
            out.push_str("      <td>");
            out.push_str(&escape_text(&text));
            out.push_str("</td>\n");
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
