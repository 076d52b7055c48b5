//! Application state and lifecycle management.
//!
//! The hosting application owns one [`App`]: it builds the plugin registry
//! once from configuration and installs it explicitly at startup. Displays
//! borrow the registry from here.

use std::path::PathBuf;

use crate::core::Config;
use crate::display::{DataTable, JsValue, Labels, PivotTable, Tabular, Visualization, Widget};
use crate::plugin::{AssetLayout, Javascript, PluginManager, PluginResult};

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    /// Loaded configuration
    pub config: Config,

    /// Layout plugins were resolved against
    pub layout: AssetLayout,

    /// Registered plugins
    pub plugins: PluginManager,
}

impl App {
    /// Build the plugin registry described by `config`.
    ///
    /// Every declaration is resolved against the static tree; a missing
    /// packaged resource aborts construction.
    pub fn new(config: Config) -> PluginResult<Self> {
        let layout = config.assets.layout();
        let plugins = PluginManager::from_specs(&layout, &config.plugin_specs())?;

        tracing::debug!(
            static_root = ?layout.static_root,
            base = %layout.base,
            plugins = plugins.len(),
            "Initialized plugin registry"
        );

        Ok(Self { config, layout, plugins })
    }

    /// Build the registry and install every plugin into the configured
    /// deployment root.
    pub fn startup(config: Config) -> PluginResult<Self> {
        let app = Self::new(config)?;
        app.install(None)?;
        Ok(app)
    }

    /// Deployment root from configuration.
    pub fn deployment_root(&self) -> PathBuf {
        self.config.assets.deployment_root()
    }

    /// Install every plugin below `root`, or the configured deployment root.
    pub fn install(&self, root: Option<PathBuf>) -> PluginResult<usize> {
        let root = root.unwrap_or_else(|| self.deployment_root());
        self.plugins.install(&root)
    }

    /// Script enabling every registered plugin.
    pub fn enable(&self) -> Javascript {
        self.plugins.enable()
    }

    /// Render `data` with `variant`.
    pub fn widget<V: Visualization + ?Sized>(
        &self,
        variant: &V,
        data: &dyn Tabular,
        labels: Option<&Labels>,
        options: Option<JsValue>,
    ) -> crate::display::DisplayResult<Widget> {
        Widget::new(variant, &self.plugins, data, labels, options)
    }

    /// Render `data` as a DataTables grid.
    pub fn data_table(
        &self,
        data: &dyn Tabular,
        labels: Option<&Labels>,
        options: Option<JsValue>,
    ) -> crate::display::DisplayResult<Widget> {
        self.widget(&DataTable, data, labels, options)
    }

    /// Render `data` as a pivot table.
    pub fn pivot_table(
        &self,
        data: &dyn Tabular,
        labels: Option<&Labels>,
        options: Option<JsValue>,
    ) -> crate::display::DisplayResult<Widget> {
        self.widget(&PivotTable, data, labels, options)
    }
}
