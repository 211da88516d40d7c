//! Tabular XML writing: `<data>` root, one `<row>` per dataset row, one
//! child element per column.
//!
//! Column names become element names verbatim. Names the source may carry
//! that XML cannot (spaces) are handled upstream by the safety codec, which
//! rewrites the source file before this writer ever sees it.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

use crate::dataset::{scalar_to_string, Dataset};
use crate::error::{WriteError, WriteResult};

const ROOT_TAG: &str = "data";
const ROW_TAG: &str = "row";

/// Serialize a dataset as flat tabular XML.
pub fn write(dataset: &Dataset, path: &Path) -> WriteResult<()> {
    let xml = serialize(dataset)?;
    fs::write(path, xml).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a dataset to XML text with a declaration.
pub fn serialize(dataset: &Dataset) -> WriteResult<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for row in dataset.rows() {
        writer.write_event(Event::Start(BytesStart::new(ROW_TAG)))?;
        for column in dataset.columns() {
            let value = row.get(column).unwrap_or(&serde_json::Value::Null);
            if value.is_null() {
                writer.write_event(Event::Empty(BytesStart::new(column.as_str())))?;
                continue;
            }
            let text = scalar_to_string(value);
            writer.write_event(Event::Start(BytesStart::new(column.as_str())))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(column.as_str())))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROW_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
