//! # cellframe
//!
//! Tabular data visualisation for notebook cells.
//!
//! cellframe converts tables into script payloads for in-browser
//! visualisation libraries. It installs the libraries' script and style
//! bundles into the notebook server's static directory, and emits bootstrap
//! code that loads them through the page's module loader before creating
//! the widget inside the output cell.
//!
//! ## Features
//!
//! - **Plugins**: Named asset bundles with dependency-aware loading (RequireJS shims)
//! - **Grids**: DataTables rendering of any table
//! - **Pivot tables**: Drag-and-drop pivoting with d3/c3 renderers
//! - **Raw options**: Unquoted script fragments inside option objects
//!
//! ## Quick Start
//!
//! ```bash
//! # Install bundled assets into the notebook data directory
//! cellframe install
//!
//! # Emit a pivot table script for a JSON table
//! cellframe pivot sales.json --label region=Region
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod core;
pub mod display;
pub mod plugin;

// Re-export commonly used types
pub use app::App;
pub use core::Config;
pub use display::{DataTable, DisplayError, Frame, JsValue, Labels, PivotTable, Tabular, Widget};
pub use plugin::{Javascript, Plugin, PluginError, PluginManager, PluginSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "cellframe";
