//! Notebook displays for tabular data.
//!
//! A [`Widget`] serializes a dataset through a [`Visualization`] (the
//! [`DataTable`] grid or the [`PivotTable`]) and wraps the result in a single
//! script that loads the plugins the visualization needs before running it.
//!
//! ```no_run
//! use cellframe::display::{Frame, Labels, PivotTable, Widget};
//! use cellframe::plugin::{builtin_specs, AssetLayout, PluginManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = AssetLayout::new("/usr/share/cellframe/static");
//! let plugins = PluginManager::from_specs(&layout, &builtin_specs())?;
//!
//! let frame = Frame::from_json(r#"{"columns": ["x", "y"], "rows": [[1, 2], [3, 4]]}"#)?;
//! let labels: Labels = [("x", "Region")].into_iter().collect();
//!
//! let widget = Widget::new(&PivotTable, &plugins, &frame, Some(&labels), None)?;
//! println!("{}", widget.script());
//! # Ok(())
//! # }
//! ```

mod datatable;
mod encoder;
mod error;
mod frame;
mod pivot;
mod selectize;
mod widget;

pub use datatable::DataTable;
pub use encoder::JsValue;
pub use error::{DisplayError, DisplayResult};
pub use frame::{Frame, Labels, Tabular};
pub use pivot::PivotTable;
pub use selectize::{Selectize, SELECTIZE_VIEW};
pub use widget::{Visualization, Widget};
