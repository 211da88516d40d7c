//! Tabular XML reading.
//!
//! Expects the standard flat shape: one row per child of the root, one
//! column per attribute or child element of each row. Anything deeper is a
//! format error, never a silent empty dataset.

use serde_json::Map;
use std::fs;
use std::path::Path;

use crate::dataset::{infer_scalar, Dataset};
use crate::error::{ReadError, ReadResult};
use crate::format::Format;
use crate::xml::XmlDocument;

/// Read a flat tabular XML file into a [`Dataset`].
pub fn read(path: &Path) -> ReadResult<Dataset> {
    let content = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Err(ReadError::EmptyFile(path.to_path_buf()));
    }
    let doc =
        XmlDocument::parse_str(&content).map_err(|e| parse_error(path, e.to_string()))?;
    from_document(&doc, path)
}

fn from_document(doc: &XmlDocument, path: &Path) -> ReadResult<Dataset> {
    if doc.root.children.is_empty() {
        return Err(parse_error(
            path,
            format!("element '{}' contains no row elements", doc.root.tag),
        ));
    }

    let mut dataset = Dataset::new();
    for (index, row_element) in doc.root.children.iter().enumerate() {
        if row_element.attributes.is_empty() && row_element.children.is_empty() {
            return Err(parse_error(
                path,
                format!(
                    "row {} element '{}' has no attributes or cell elements; the document is not flat tabular XML",
                    index + 1,
                    row_element.tag
                ),
            ));
        }
        let mut row = Map::new();
        for (name, value) in &row_element.attributes {
            row.insert(name.clone(), infer_scalar(value));
        }
        for cell in &row_element.children {
            if cell.has_element_children() {
                return Err(parse_error(
                    path,
                    format!(
                        "row {} element '{}' has nested children; the document is not flat tabular XML",
                        index + 1,
                        cell.tag
                    ),
                ));
            }
            row.insert(
                cell.tag.clone(),
                infer_scalar(cell.text.as_deref().unwrap_or("")),
            );
        }
        dataset.push_row(row);
    }
    Ok(dataset)
}

fn parse_error(path: &Path, message: String) -> ReadError {
    ReadError::Parse {
        path: path.to_path_buf(),
        expected: Format::Xml,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn xml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".xml").unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_columns_from_child_elements() {
        let file = xml_file(
            "<data>\
             <row><col1>1</col1><col2>2</col2></row>\
             <row><col1>3</col1><col2>4</col2></row>\
             </data>",
        );
        let dataset = read(file.path()).unwrap();

        assert_eq!(dataset.columns(), &["col1", "col2"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.get(1, "col2"), Some(&json!(4)));
    }

    #[test]
    fn test_columns_from_attributes() {
        let file = xml_file(r#"<data><row a="1" b="x"/><row a="2" b="y"/></data>"#);
        let dataset = read(file.path()).unwrap();

        assert_eq!(dataset.columns(), &["a", "b"]);
        assert_eq!(dataset.get(0, "b"), Some(&json!("x")));
    }

    #[test]
    fn test_missing_cells_become_null() {
        let file = xml_file("<data><row><a>1</a><b>2</b></row><row><a>3</a></row></data>");
        let dataset = read(file.path()).unwrap();

        assert_eq!(dataset.get(1, "b"), Some(&Value::Null));
    }

    #[test]
    fn test_nested_document_is_a_format_error() {
        let file = xml_file("<data><row><a><deep>1</deep></a></row></data>");
        let err = read(file.path()).unwrap_err();
        assert!(err.to_string().contains("not flat tabular"));
    }

    #[test]
    fn test_cell_less_rows_are_a_format_error() {
        // Text-only rows carry no columns.
        let file = xml_file("<data><row>plain text</row></data>");
        let err = read(file.path()).unwrap_err();
        assert!(err.to_string().contains("no attributes or cell elements"));

        let file = xml_file("<data><row/></data>");
        assert!(read(file.path()).is_err());
    }

    #[test]
    fn test_rowless_document_is_a_format_error() {
        let file = xml_file("<data/>");
        let err = read(file.path()).unwrap_err();
        assert!(err.to_string().contains("no row elements"));
    }

    #[test]
    fn test_malformed_xml_is_a_parse_error() {
        let file = xml_file("<data><row></data>");
        assert!(matches!(read(file.path()), Err(ReadError::Parse { .. })));
    }
}
