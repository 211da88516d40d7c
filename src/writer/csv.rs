//! CSV writing: canonical comma delimiter, LF line endings.

use std::fs;
use std::path::Path;

use crate::dataset::{scalar_to_string, Dataset};
use crate::error::{WriteError, WriteResult};

/// Serialize a dataset as CSV text.
pub fn write(dataset: &Dataset, path: &Path) -> WriteResult<()> {
    let file = fs::File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        let fields: Vec<String> = dataset
            .columns()
            .iter()
            .map(|column| scalar_to_string(row.get(column).unwrap_or(&serde_json::Value::Null)))
            .collect();
        writer.write_record(&fields)?;
    }
    writer.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn sample() -> Dataset {
        let mut dataset = Dataset::with_columns(["col1", "col2"]);
        for (a, b) in [(json!(1), json!(2)), (json!(3), serde_json::Value::Null)] {
            let mut row = Map::new();
            row.insert("col1".into(), a);
            row.insert("col2".into(), b);
            dataset.push_row(row);
        }
        dataset
    }

    #[test]
    fn test_write_comma_lf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "col1,col2\n1,2\n3,\n");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut dataset = Dataset::with_columns(["text"]);
        let mut row = Map::new();
        row.insert("text".into(), json!("a, b"));
        dataset.push_row(row);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write(&dataset, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "text\n\"a, b\"\n");
    }
}
