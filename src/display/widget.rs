//! Display adapter turning tabular data into a bootstrap script.

use serde_json::Value;

use super::frame::check_width;
use super::{DisplayResult, JsValue, Labels, Tabular};
use crate::plugin::{render_all, require_call, Activation, Javascript, PluginManager};

/// A visualization library binding.
pub trait Visualization {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Plugins the script body requires.
    fn plugins(&self) -> &[&'static str];

    /// Script run once the plugins have loaded. `element` refers to the
    /// output cell's container.
    fn body(&self, columns: &[String], rows: Vec<Vec<Value>>, options: Option<&JsValue>) -> DisplayResult<String>;
}

/// A rendered visualization of one dataset.
///
/// The script is produced once, at construction, and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    plugins: Vec<String>,
    columns: Vec<String>,
    script: Javascript,
}

impl Widget {
    /// Serialize `data` through `variant` and wrap the result in the load
    /// instructions for every plugin it requires.
    ///
    /// The payload injects stylesheets, registers loader configuration for the
    /// required plugins and their registered dependencies, runs plugin
    /// initialisation, then runs the visualization body.
    pub fn new<V: Visualization + ?Sized>(
        variant: &V,
        manager: &PluginManager,
        data: &dyn Tabular,
        labels: Option<&Labels>,
        options: Option<JsValue>,
    ) -> DisplayResult<Self> {
        let raw_columns = data.columns();
        let columns = match labels {
            Some(labels) => labels.apply(&raw_columns),
            None => raw_columns,
        };

        let rows = data.rows()?;
        for (index, row) in rows.iter().enumerate() {
            check_width(index, row.len(), columns.len())?;
        }
        let row_count = rows.len();

        let body = variant.body(&columns, rows, options.as_ref())?;

        let names = variant.plugins();
        let activations: Vec<Activation> =
            manager.with_dependencies(names)?.into_iter().map(|plugin| plugin.enable()).collect();

        let plugins: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        let bootstrap = require_call(&plugins, &[], &body);

        let setup = render_all(&activations);
        let script = if setup.is_empty() {
            Javascript::new(bootstrap)
        } else {
            Javascript::new(format!("{setup}\n{bootstrap}"))
        };

        tracing::debug!(
            widget = variant.name(),
            rows = row_count,
            columns = columns.len(),
            plugins = activations.len(),
            "Rendered widget"
        );

        Ok(Self { plugins, columns, script })
    }

    /// Plugins the script body requires.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Column labels as displayed.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The script payload.
    pub fn script(&self) -> &Javascript {
        &self.script
    }

    /// Consume the widget, returning its payload.
    pub fn into_javascript(self) -> Javascript {
        self.script
    }
}

/// Rows as a JSON matrix.
pub(crate) fn rows_value(rows: Vec<Vec<Value>>) -> JsValue {
    JsValue::Array(rows.into_iter().map(|row| JsValue::from(Value::Array(row))).collect())
}
