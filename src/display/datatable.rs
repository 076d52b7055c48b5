//! DataTables grid display.

use serde_json::Value;

use super::widget::rows_value;
use super::{DisplayError, DisplayResult, JsValue, Visualization};

/// Display a table as an interactive DataTables grid.
///
/// Options must be an object; its entries are merged into the grid's
/// initialisation object after `data` and `columns`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTable;

impl DataTable {
    /// Initialisation object for the grid.
    pub fn init_object(columns: &[String], rows: Vec<Vec<Value>>, options: Option<&JsValue>) -> DisplayResult<JsValue> {
        let titles = columns
            .iter()
            .map(|column| {
                let mut title = JsValue::object();
                title.insert("title", column.as_str());
                title
            })
            .collect::<Vec<_>>();

        let mut init = JsValue::object();
        init.insert("data", rows_value(rows));
        init.insert("columns", JsValue::Array(titles));

        match options {
            None | Some(JsValue::Null) => {}
            Some(JsValue::Object(entries)) => {
                for (key, value) in entries {
                    init.insert(key.clone(), value.clone());
                }
            }
            Some(other) => {
                return Err(DisplayError::InvalidOptions(format!(
                    "DataTable options must be an object, got {other}"
                )));
            }
        }

        Ok(init)
    }
}

impl Visualization for DataTable {
    fn name(&self) -> &str {
        "datatable"
    }

    fn plugins(&self) -> &[&'static str] {
        &["datatables"]
    }

    fn body(&self, columns: &[String], rows: Vec<Vec<Value>>, options: Option<&JsValue>) -> DisplayResult<String> {
        let init = Self::init_object(columns, rows, options)?;
        Ok(format!("element.append('<table />').find('table').DataTable({init});"))
    }
}
