//! Configuration management for cellframe.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plugin::{builtin_specs, merge_specs, AssetLayout, PluginSpec, DEFAULT_BASE};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset locations
    pub assets: AssetsConfig,

    /// Additional or overriding plugin declarations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,
}

/// Asset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Packaged static-asset tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_root: Option<String>,

    /// Directory plugins are installed into (the notebook data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_root: Option<String>,

    /// Base below the deployment root, also the URL prefix assets are served from
    pub base: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self { static_root: None, deployment_root: None, base: DEFAULT_BASE.to_string() }
    }
}

impl AssetsConfig {
    /// Resolved static root.
    pub fn static_root(&self) -> PathBuf {
        self.static_root
            .as_deref()
            .map(expand_path)
            .or_else(|| Config::data_dir().map(|d| d.join("static")))
            .unwrap_or_else(|| PathBuf::from("static"))
    }

    /// Resolved deployment root.
    pub fn deployment_root(&self) -> PathBuf {
        self.deployment_root
            .as_deref()
            .map(expand_path)
            .or_else(|| dirs::data_dir().map(|d| d.join("jupyter")))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Layout plugins resolve against.
    pub fn layout(&self) -> AssetLayout {
        AssetLayout::new(self.static_root()).with_base(&self.base)
    }
}

/// Expand `~` and environment variables in a configured path.
fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!(path, error = %e, "Failed to expand path, using it verbatim");
            PathBuf::from(path)
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.cellframe.toml` in current directory
    /// 2. `~/.config/cellframe/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let local_config = PathBuf::from(".cellframe.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = ?path, plugins = config.plugins.len(), "Loaded configuration");
        Ok(config)
    }

    /// Built-in plugin declarations merged with the configured ones.
    pub fn plugin_specs(&self) -> Vec<PluginSpec> {
        merge_specs(builtin_specs(), self.plugins.clone())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cellframe"))
    }

    /// Get the data directory path (packaged assets).
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("cellframe"))
    }
}
