//! Pivot table display.

use serde_json::Value;

use super::widget::rows_value;
use super::{DisplayError, DisplayResult, JsValue, Visualization};

/// Display a table as an interactive pivot table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotTable;

impl PivotTable {
    /// The header row followed by the data rows.
    pub fn matrix(columns: &[String], rows: Vec<Vec<Value>>) -> JsValue {
        let header = JsValue::Array(columns.iter().map(|c| JsValue::from(c.as_str())).collect());

        let mut matrix = vec![header];
        if let JsValue::Array(rows) = rows_value(rows) {
            matrix.extend(rows);
        }
        JsValue::Array(matrix)
    }
}

impl Visualization for PivotTable {
    fn name(&self) -> &str {
        "pivot"
    }

    fn plugins(&self) -> &[&'static str] {
        &["pivot", "d3", "c3"]
    }

    fn body(&self, columns: &[String], rows: Vec<Vec<Value>>, options: Option<&JsValue>) -> DisplayResult<String> {
        let options = match options {
            None | Some(JsValue::Null) => JsValue::object(),
            Some(options @ JsValue::Object(_)) => options.clone(),
            Some(other) => {
                return Err(DisplayError::InvalidOptions(format!(
                    "PivotTable options must be an object, got {other}"
                )));
            }
        };

        Ok(format!("element.pivotUI({}, {});", Self::matrix(columns, rows), options))
    }
}
