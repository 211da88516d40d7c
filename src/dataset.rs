//! Canonical in-memory row/column representation.
//!
//! Every tabular reader produces a [`Dataset`] and every writer consumes
//! one. Rows are JSON objects keyed by column name; `serde_json`'s
//! `preserve_order` feature keeps the key order stable, so the column order
//! observed in the source file survives every conversion.

use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered sequence of named columns and an ordered sequence of rows.
///
/// Invariants:
/// - column names are unique, in first-seen order;
/// - every row carries exactly the declared columns; values missing in the
///   source become `Value::Null`, never omitted keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset with a declared column order.
    ///
    /// Duplicate names keep only their first occurrence.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new();
        for column in columns {
            dataset.add_column(&column.into());
        }
        dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Declare a column if unseen, backfilling existing rows with nulls.
    pub fn add_column(&mut self, name: &str) {
        if self.columns.iter().any(|c| c == name) {
            return;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.insert(name.to_string(), Value::Null);
        }
    }

    /// Append a row.
    ///
    /// Keys not yet declared become new columns; declared columns missing
    /// from the row are filled with `Value::Null`. The stored row is
    /// normalized to the declared column order.
    pub fn push_row(&mut self, row: Map<String, Value>) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
                for existing in &mut self.rows {
                    existing.insert(key.clone(), Value::Null);
                }
            }
        }
        let mut normalized = Map::new();
        for column in &self.columns {
            normalized.insert(
                column.clone(),
                row.get(column).cloned().unwrap_or(Value::Null),
            );
        }
        self.rows.push(normalized);
    }

    /// Cell lookup by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Parse a raw cell into the narrowest scalar it represents.
///
/// Empty text is a missing value, never an empty string.
pub fn infer_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        return Value::from(float);
    }
    match trimmed.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(trimmed.to_string()),
    }
}

/// Render a scalar back to cell text. Nulls render as the empty string.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
