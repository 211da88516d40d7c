//! Conversion orchestration.
//!
//! `convert` ties the pipeline together: resolve both formats from the
//! file extensions, find the (input, output) pair in the capability
//! matrix, lock both paths, run the reader and writer, and report what
//! was converted. XML-bound conversions wrap the input in the space
//! sentinel guard so the file comes back byte-identical whether the
//! conversion succeeds or fails.

pub mod xmlsafe;

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::capability::{self, Capability};
use crate::error::{ConvertError, ConvertResult, ReadError};
use crate::format::Format;
use crate::logs::log_success;
use crate::pathlock;
use crate::convert::xmlsafe::XmlSafetyGuard;

// ============================================================================
// Report
// ============================================================================

/// Summary of a completed conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source_stem: String,
    pub source_format: Format,
    pub target_stem: String,
    pub target_format: Format,
    pub rows: usize,
    pub columns: Vec<String>,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Successfully converted {} {} to {} {} ({} rows)",
            self.source_stem, self.source_format, self.target_stem, self.target_format, self.rows
        )
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ============================================================================
// Conversion
// ============================================================================

/// Convert `input` into `output`, with both formats derived from the
/// file extensions.
pub fn convert(input: &Path, output: &Path) -> ConvertResult<Report> {
    let input_format = Format::from_path(input)?;
    let output_format = Format::from_path(output)?;
    let capability = capability::lookup(input_format, output_format).ok_or(
        ConvertError::Unsupported {
            input: input_format,
            output: output_format,
        },
    )?;

    // Hold both path locks for the whole conversion so a concurrent
    // call cannot observe the sentinel form of the input.
    let locks = pathlock::locks_for(&[input, output]);
    let _held: Vec<_> = locks.iter().map(pathlock::acquire).collect();

    if !input.exists() {
        return Err(ConvertError::Read(ReadError::FileNotFound(
            input.to_path_buf(),
        )));
    }

    // Spaces in a binary input never become XML element names, and the
    // byte rewrite would corrupt the archive; the codec only ever wraps
    // textual inputs.
    let guard = if output_format == Format::Xml && input_format.is_text() {
        Some(XmlSafetyGuard::engage(input).map_err(|e| engage_error(input, e))?)
    } else {
        None
    };

    match run(capability, input, output) {
        Ok((rows, columns)) => {
            if let Some(guard) = guard {
                guard.restore().map_err(|source| ConvertError::Restore {
                    path: input.to_path_buf(),
                    source,
                })?;
            }
            let report = Report {
                source_stem: stem(input),
                source_format: input_format,
                target_stem: stem(output),
                target_format: output_format,
                rows,
                columns,
            };
            log_success(&report.to_string());
            Ok(report)
        }
        // The guard is dropped here, restoring the input before the
        // conversion error propagates.
        Err(e) => Err(e),
    }
}

fn run(
    capability: &Capability,
    input: &Path,
    output: &Path,
) -> ConvertResult<(usize, Vec<String>)> {
    let dataset = (capability.reader)(input)?;
    (capability.writer)(&dataset, output)?;
    Ok((dataset.row_count(), dataset.columns().to_vec()))
}

fn engage_error(path: &Path, source: io::Error) -> ConvertError {
    if source.kind() == io::ErrorKind::NotFound {
        ConvertError::Read(ReadError::FileNotFound(path.to_path_buf()))
    } else {
        ConvertError::Read(ReadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::supported_pairs;
    use crate::{reader, Dataset};
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    // A minimal two-row, two-column table rendered in every readable
    // input format.
    const FIXTURE_COLUMNS: [&str; 2] = ["name", "count"];
    const FIXTURE_ROWS: usize = 2;

    fn fixture(dir: &Path, format: Format) -> PathBuf {
        let path = dir.join(format!("table.{}", format.extension()));
        match format {
            Format::Csv => fs::write(&path, "name,count\nwidget,3\ngadget,5\n").unwrap(),
            Format::Json => fs::write(
                &path,
                r#"[{"name":"widget","count":3},{"name":"gadget","count":5}]"#,
            )
            .unwrap(),
            Format::Xml => fs::write(
                &path,
                "<data>\
                 <row><name>widget</name><count>3</count></row>\
                 <row><name>gadget</name><count>5</count></row>\
                 </data>",
            )
            .unwrap(),
            Format::Xlsx => write_xlsx_fixture(&path),
            Format::Markdown | Format::Html => unreachable!("render-only formats"),
        }
        path
    }

    // Hand-assembled single-sheet workbook with inline strings; just
    // enough of the package for calamine to open.
    fn write_xlsx_fixture(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut archive = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let parts: [(&str, &str); 5] = [
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>name</t></is></c><c r="B1" t="inlineStr"><is><t>count</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>widget</t></is></c><c r="B2"><v>3</v></c></row>
<row r="3"><c r="A3" t="inlineStr"><is><t>gadget</t></is></c><c r="B3"><v>5</v></c></row>
</sheetData>
</worksheet>"#,
            ),
        ];
        for (name, content) in parts {
            archive.start_file(name, options).unwrap();
            archive.write_all(content.as_bytes()).unwrap();
        }
        archive.finish().unwrap();
    }

    fn assert_table_shape(dataset: &Dataset) {
        assert_eq!(dataset.columns(), &FIXTURE_COLUMNS);
        assert_eq!(dataset.row_count(), FIXTURE_ROWS);
    }

    #[test]
    fn test_every_supported_pair_converts_the_fixture() {
        for (input_format, output_format) in supported_pairs() {
            let dir = tempdir().unwrap();
            let input = fixture(dir.path(), input_format);
            let input_bytes = fs::read(&input).unwrap();
            let output = dir
                .path()
                .join(format!("out.{}", output_format.extension()));

            let report = convert(&input, &output)
                .unwrap_or_else(|e| panic!("{input_format} to {output_format}: {e}"));
            assert_eq!(report.rows, FIXTURE_ROWS, "{input_format} to {output_format}");
            assert_eq!(report.columns, &FIXTURE_COLUMNS);

            // Row count and column set survive into the output file.
            match output_format {
                Format::Csv => assert_table_shape(&reader::csv::read(&output).unwrap()),
                Format::Json => assert_table_shape(&reader::json::read(&output).unwrap()),
                Format::Xml => assert_table_shape(&reader::xml::read(&output).unwrap()),
                Format::Markdown => {
                    let table = fs::read_to_string(&output).unwrap();
                    assert_eq!(table.lines().count(), FIXTURE_ROWS + 2);
                    assert!(table.starts_with("| name | count |"));
                }
                Format::Html => {
                    let table = fs::read_to_string(&output).unwrap();
                    assert_eq!(table.matches("<tr>").count(), FIXTURE_ROWS + 1);
                    assert!(table.contains("<th>name</th>"));
                    assert!(table.contains("<th>count</th>"));
                }
                Format::Xlsx => unreachable!("no writer"),
            }

            // The input is byte-identical afterwards, XML targets included.
            assert_eq!(fs::read(&input).unwrap(), input_bytes);
        }
    }

    #[test]
    fn test_csv_to_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("people.csv");
        let output = dir.path().join("people.json");
        fs::write(&input, "name,age\nalice,30\nbob,41\n").unwrap();

        let report = convert(&input, &output).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.columns, vec!["name", "age"]);
        assert_eq!(
            report.to_string(),
            "Successfully converted people CSV to people JSON (2 rows)"
        );

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "alice");
        assert_eq!(json[1]["age"], 41);
    }

    #[test]
    fn test_unsupported_pair_creates_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.xlsx");
        fs::write(&input, "a,b\n1,2\n").unwrap();

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Unsupported { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_xml_target_restores_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.csv");
        let output = dir.path().join("notes.xml");
        let original = "title,body\nfirst,hello world\n";
        fs::write(&input, original).unwrap();

        convert(&input, &output).unwrap();

        assert_eq!(fs::read_to_string(&input).unwrap(), original);
        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.contains("hello_world"));
    }

    #[test]
    fn test_latin1_csv_converts_to_xml_and_restores() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("firms.csv");
        let output = dir.path().join("firms.xml");
        // "Société Générale,Paris" in latin-1; not valid UTF-8.
        let original: &[u8] = b"name,city\nSoci\xE9t\xE9 G\xE9n\xE9rale,Paris\n";
        fs::write(&input, original).unwrap();

        let report = convert(&input, &output).unwrap();
        assert_eq!(report.rows, 1);
        assert_eq!(fs::read(&input).unwrap(), original);

        let xml = fs::read_to_string(&output).unwrap();
        assert!(xml.contains("Paris"));
        // The space went through the sentinel before decoding.
        assert!(xml.contains("rale</name>"));
    }

    #[test]
    fn test_xml_target_restores_input_on_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.csv");
        let output = dir.path().join("missing-dir").join("notes.xml");
        let original = "title,body\nfirst,hello world\n";
        fs::write(&input, original).unwrap();

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Write(_)));
        assert_eq!(fs::read_to_string(&input).unwrap(), original);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.csv");
        let output = dir.path().join("out.json");

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Read(ReadError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data.parquet");
        let output = dir.path().join("data.json");
        fs::write(&input, "x").unwrap();

        let err = convert(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Format(_)));
    }
}
