//! Tabular data and column labels.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DisplayError, DisplayResult};

/// Source of rows and column names.
pub trait Tabular {
    /// Column names, in order.
    fn columns(&self) -> Vec<String>;

    /// Rows, each with one value per column.
    fn rows(&self) -> DisplayResult<Vec<Vec<Value>>>;
}

/// In-memory table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Accepted JSON shapes for a table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameData {
    /// `{"columns": [...], "rows": [[...], ...]}`
    Split { columns: Vec<String>, rows: Vec<Value> },
    /// `[{"column": value, ...}, ...]`
    Records(Vec<serde_json::Map<String, Value>>),
}

impl Frame {
    /// Create a table from columns and already-serialized rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> DisplayResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            check_width(index, row.len(), columns.len())?;
        }
        Ok(Self { columns, rows })
    }

    /// Create a table from serializable rows.
    ///
    /// Each row must serialize to an array (values in column order) or to a
    /// map (values looked up by column name; absent columns become `null`).
    pub fn from_rows<I, R>(columns: Vec<String>, rows: I) -> DisplayResult<Self>
    where
        I: IntoIterator<Item = R>,
        R: Serialize,
    {
        let rows = rows
            .into_iter()
            .map(|row| serde_json::to_value(row).map_err(DisplayError::from))
            .collect::<DisplayResult<Vec<_>>>()?;

        Self::from_values(columns, rows)
    }

    /// Parse a table from JSON, either split (`{"columns", "rows"}`) or as a
    /// list of records.
    ///
    /// Record columns are every key of every record, in order of first
    /// appearance; a record without a key gets `null` there.
    pub fn from_json(text: &str) -> DisplayResult<Self> {
        match serde_json::from_str::<FrameData>(text)? {
            FrameData::Split { columns, rows } => Self::from_values(columns, rows),
            FrameData::Records(records) => {
                let mut columns: Vec<String> = Vec::new();
                for key in records.iter().flat_map(|record| record.keys()) {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
                let rows = records.into_iter().map(Value::Object).collect();
                Self::from_values(columns, rows)
            }
        }
    }

    fn from_values(columns: Vec<String>, rows: Vec<Value>) -> DisplayResult<Self> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| -> DisplayResult<Vec<Value>> {
                match row {
                    Value::Array(values) => {
                        check_width(index, values.len(), columns.len())?;
                        Ok(values)
                    }
                    Value::Object(mut map) => {
                        Ok(columns.iter().map(|c| map.remove(c).unwrap_or(Value::Null)).collect())
                    }
                    other => Err(DisplayError::InvalidData(format!(
                        "row {index} must be an array or an object, got {other}"
                    ))),
                }
            })
            .collect::<DisplayResult<Vec<_>>>()?;

        Ok(Self { columns, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Tabular for Frame {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn rows(&self) -> DisplayResult<Vec<Vec<Value>>> {
        Ok(self.rows.clone())
    }
}

/// Check that a row has one value per column.
pub(crate) fn check_width(index: usize, width: usize, columns: usize) -> DisplayResult<()> {
    if width == columns {
        Ok(())
    } else {
        Err(DisplayError::InvalidData(format!("row {index} has {width} values, expected {columns}")))
    }
}

/// Mapping from column name to display label.
///
/// Unmapped columns keep their names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(HashMap<String, String>);

impl Labels {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `column` to `label`.
    pub fn insert(&mut self, column: impl Into<String>, label: impl Into<String>) {
        self.0.insert(column.into(), label.into());
    }

    /// Label for `column`.
    pub fn label<'a>(&'a self, column: &'a str) -> &'a str {
        self.0.get(column).map_or(column, String::as_str)
    }

    /// Labels for `columns`, in order.
    pub fn apply(&self, columns: &[String]) -> Vec<String> {
        columns.iter().map(|c| self.label(c).to_string()).collect()
    }

    /// Check if no labels are defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
