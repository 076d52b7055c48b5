//! Plugin manager for registering, installing and enabling plugins.

use std::collections::HashSet;
use std::path::Path;

use super::activation::{render_all, Activation, Javascript};
use super::{AssetLayout, Plugin, PluginError, PluginResult, PluginSpec};

/// Ordered registry of plugins, keyed by name.
///
/// Registration order is the order plugins are installed and enabled in.
/// Load-before-use ordering in the browser comes from each plugin's shim
/// graph, not from this order.
#[derive(Debug, Clone, Default)]
pub struct PluginManager {
    plugins: Vec<(String, Plugin)>,
}

impl PluginManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register every declaration, in order.
    ///
    /// Fails on the first declaration that cannot be resolved.
    pub fn from_specs(layout: &AssetLayout, specs: &[PluginSpec]) -> PluginResult<Self> {
        let mut manager = Self::new();
        for spec in specs {
            let plugin = spec.build(layout)?;
            manager.register(spec.name.clone(), plugin);
        }
        Ok(manager)
    }

    /// Register a plugin under `name`.
    ///
    /// Re-registering a name replaces the plugin but keeps its original
    /// position. Returns the replaced plugin, if any.
    pub fn register(&mut self, name: impl Into<String>, plugin: Plugin) -> Option<Plugin> {
        let name = name.into();

        if let Some((_, existing)) = self.plugins.iter_mut().find(|(key, _)| *key == name) {
            tracing::debug!(plugin = %name, "Replacing registered plugin");
            return Some(std::mem::replace(existing, plugin));
        }

        tracing::debug!(plugin = %name, "Registered plugin");
        self.plugins.push((name, plugin));
        None
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> PluginResult<&Plugin> {
        self.find(name).ok_or_else(|| PluginError::UnknownPlugin(name.to_string()))
    }

    /// Get a plugin by name, if registered.
    pub fn find(&self, name: &str) -> Option<&Plugin> {
        self.plugins.iter().find(|(key, _)| key == name).map(|(_, plugin)| plugin)
    }

    /// Check whether a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|(key, _)| key.as_str())
    }

    /// Registered plugins, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Plugin)> {
        self.plugins.iter().map(|(key, plugin)| (key.as_str(), plugin))
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Install every plugin under `root`, in registration order.
    ///
    /// Stops at the first failure; files already copied stay in place.
    pub fn install(&self, root: &Path) -> PluginResult<usize> {
        let mut copied = 0;
        for (name, plugin) in &self.plugins {
            let count = plugin.install(root)?;
            tracing::debug!(plugin = %name, files = count, "Installed plugin");
            copied += count;
        }

        tracing::info!(plugins = self.plugins.len(), files = copied, root = ?root, "Installed plugins");
        Ok(copied)
    }

    /// Activations of every plugin, in registration order.
    pub fn activations(&self) -> Vec<Activation> {
        self.plugins.iter().map(|(_, plugin)| plugin.enable()).collect()
    }

    /// Script enabling every plugin.
    pub fn enable(&self) -> Javascript {
        render_all(&self.activations())
    }

    /// The named plugins plus every registered plugin they depend on,
    /// dependencies first and without repeats.
    ///
    /// Dependencies that are not registered (modules supplied by the host
    /// page, such as `jquery`) are left to the module loader.
    pub fn with_dependencies<S: AsRef<str>>(&self, names: &[S]) -> PluginResult<Vec<&Plugin>> {
        let mut ordered = Vec::new();
        let mut visited = HashSet::new();

        for name in names {
            let name = name.as_ref();
            self.get(name)?;
            self.visit(name, &mut visited, &mut ordered);
        }

        Ok(ordered)
    }

    fn visit<'a>(&'a self, name: &str, visited: &mut HashSet<String>, ordered: &mut Vec<&'a Plugin>) {
        if !visited.insert(name.to_string()) {
            return;
        }

        let Some(plugin) = self.find(name) else {
            return;
        };

        for dep in plugin.deps() {
            self.visit(dep, visited, ordered);
        }
        ordered.push(plugin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn static_tree(files: &[&str]) -> (TempDir, AssetLayout) {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            let path = temp_dir.path().join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, file).unwrap();
        }
        let layout = AssetLayout::new(temp_dir.path());
        (temp_dir, layout)
    }

    fn manager() -> (TempDir, PluginManager) {
        let (dir, layout) = static_tree(&["d3/js/d3.min.js", "c3/js/c3.min.js", "c3/css/c3.min.css"]);
        let specs = vec![
            PluginSpec::new("c3", "c3.min.js").with_deps("d3"),
            PluginSpec::new("d3", "d3.min.js"),
            PluginSpec::new("google", "//www.google.com/jsapi").with_deps("jquery"),
        ];
        let manager = PluginManager::from_specs(&layout, &specs).unwrap();
        (dir, manager)
    }

    #[test]
    fn test_from_specs_keeps_order() {
        let (_dir, manager) = manager();

        assert_eq!(manager.len(), 3);
        assert_eq!(manager.names().collect::<Vec<_>>(), vec!["c3", "d3", "google"]);
    }

    #[test]
    fn test_from_specs_fails_fast() {
        let (_dir, layout) = static_tree(&["d3/js/d3.min.js"]);
        let specs = vec![PluginSpec::new("d3", "d3.min.js"), PluginSpec::new("c3", "c3.min.js")];

        let result = PluginManager::from_specs(&layout, &specs);
        assert!(matches!(result, Err(PluginError::MissingResource { .. })));
    }

    #[test]
    fn test_get_unknown_plugin() {
        let (_dir, manager) = manager();

        assert!(manager.get("d3").is_ok());
        assert!(manager.find("leaflet").is_none());
        assert!(matches!(manager.get("leaflet"), Err(PluginError::UnknownPlugin(name)) if name == "leaflet"));
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let (_dir, mut manager) = manager();
        let (_other, layout) = static_tree(&[]);

        let replacement = Plugin::builder("d3", "//cdn.example.com/d3.min.js").build(&layout).unwrap();
        let previous = manager.register("d3", replacement);

        assert!(previous.is_some());
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.names().collect::<Vec<_>>(), vec!["c3", "d3", "google"]);
        assert!(manager.get("d3").unwrap().main().is_external());
    }

    #[test]
    fn test_install_all() {
        let (_dir, manager) = manager();
        let root = TempDir::new().unwrap();

        let copied = manager.install(root.path()).unwrap();
        assert_eq!(copied, 3);

        let base = root.path().join("nbextensions").join("cellframe");
        assert!(base.join("c3").join("css").join("c3.min.css").is_file());
        assert!(base.join("d3").join("js").join("d3.min.js").is_file());
        assert!(!base.join("google").exists());
    }

    #[test]
    fn test_enable_all() {
        let (_dir, manager) = manager();

        let script = manager.enable().into_string();
        assert_eq!(script.matches("require.config(").count(), 3);
        assert!(script.contains("/nbextensions/cellframe/c3/css/c3.min.css"));
        assert!(script.find("stylesheet").unwrap() < script.find("require.config(").unwrap());
    }

    #[test]
    fn test_with_dependencies() {
        let (_dir, manager) = manager();

        let plugins = manager.with_dependencies(&["google", "c3", "d3"]).unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["google", "d3", "c3"]);

        assert!(manager.with_dependencies(&["leaflet"]).is_err());
    }

    #[test]
    fn test_with_dependencies_tolerates_cycles() {
        let (_dir, layout) = static_tree(&[]);
        let mut manager = PluginManager::new();
        manager.register(
            "a",
            Plugin::builder("a", "//cdn.example.com/a.js").deps(["b"]).build(&layout).unwrap(),
        );
        manager.register(
            "b",
            Plugin::builder("b", "//cdn.example.com/b.js").deps(["a"]).build(&layout).unwrap(),
        );

        let plugins = manager.with_dependencies(&["a"]).unwrap();
        let names: Vec<&str> = plugins.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_install_stops_at_first_failure() {
        let (dir, layout) = static_tree(&["a/js/a.js", "b/js/b.js", "c/js/c.js"]);
        let specs: Vec<PluginSpec> =
            ["a", "b", "c"].iter().map(|name| PluginSpec::new(*name, format!("{name}.js"))).collect();
        let manager = PluginManager::from_specs(&layout, &specs).unwrap();
        std::fs::remove_file(dir.path().join("b").join("js").join("b.js")).unwrap();
        let root = TempDir::new().unwrap();

        let result = manager.install(root.path());
        assert!(matches!(result, Err(PluginError::Io(_))));

        let installed = root.path().join("nbextensions").join("cellframe");
        assert!(installed.join("a").join("js").join("a.js").is_file());
        assert!(!installed.join("c").exists());
    }
}
