//! Markdown writing: a GitHub-style pipe table.

use std::fs;
use std::path::Path;

use crate::dataset::{scalar_to_string, Dataset};
use crate::error::{WriteError, WriteResult};

/// Serialize a dataset as a Markdown pipe table.
pub fn write(dataset: &Dataset, path: &Path) -> WriteResult<()> {
    fs::write(path, serialize(dataset)).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the pipe table as a string.
pub fn serialize(dataset: &Dataset) -> String {
    let mut out = String::new();

    out.push_str("| ");
    out.push_str(
        &dataset
            .columns()
            .iter()
            .map(|c| escape_cell(c))
            .collect::<Vec<_>>()
            .join(" | "),
    );
    out.push_str(" |\n| ");
    out.push_str(
        &dataset
            .columns()
            .iter()
            .map(|_| "---")
            .collect::<Vec<_>>()
            .join(" | "),
    );
    out.push_str(" |\n");

    for row in dataset.rows() {
        out.push_str("| ");
        let cells: Vec<String> = dataset
            .columns()
            .iter()
            .map(|column| {
                escape_cell(&scalar_to_string(
                    row.get(column).unwrap_or(&serde_json::Value::Null),
                ))
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
