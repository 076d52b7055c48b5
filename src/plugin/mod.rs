//! Plugin system for cellframe.
//!
//! A plugin is a named bundle of browser-side assets (one primary script,
//! auxiliary scripts, stylesheets and images) packaged under a static tree:
//!
//! ```text
//! <static_root>/<plugin>/js/...
//! <static_root>/<plugin>/css/...
//! <static_root>/<plugin>/images/...
//! ```
//!
//! Installing a plugin copies its packaged files below the deployment root
//! (`<root>/<base>/<plugin>/<kind>/...`), where the notebook server serves
//! them as `/<base>/...`. Enabling a plugin emits the stylesheet injections
//! and module-loader configuration the browser needs to load it, with a shim
//! graph so no script runs before its dependencies.
//!
//! # Example Configuration
//!
//! ```toml
//! [[plugins]]
//! name = "pivot"
//! main = "pivot.min.js"
//! deps = ["jquery", "jqueryui"]
//! ```

mod activation;
mod bundle;
mod error;
mod manager;
mod manifest;
mod resolver;
mod types;

pub use activation::{binding_name, binding_names, render_all, require_call, style_injection, Activation, Javascript};
pub use bundle::{Plugin, PluginBuilder};
pub use error::{PluginError, PluginResult};
pub use manager::PluginManager;
pub use manifest::{builtin_specs, merge_specs, OneOrMany, PluginSpec};
pub use resolver::{discover, resolve};
pub use types::{is_external, AssetLayout, Resource, ResourceKind, DEFAULT_BASE, WILDCARD};
