//! A named bundle of browser-side assets.

use std::path::Path;

use serde_json::{Map, Value};

use super::activation::{binding_names, require_call, Activation};
use super::resolver::resolve;
use super::{AssetLayout, PluginError, PluginResult, Resource, ResourceKind, WILDCARD};

/// An installable, dependency-aware bundle of script, style and image assets.
///
/// Resources are resolved against the static tree when the plugin is built,
/// so a plugin that exists always refers to assets that existed at that time.
#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    name: String,
    main: Resource,
    scripts: Vec<Resource>,
    styles: Vec<Resource>,
    images: Vec<Resource>,
    deps: Vec<String>,
    init: Option<String>,
    layout: AssetLayout,
}

/// Builder for [`Plugin`].
///
/// Undeclared auxiliary scripts, styles and images are discovered from the
/// static tree.
#[derive(Debug, Clone, Default)]
pub struct PluginBuilder {
    name: String,
    main: String,
    scripts: Option<Vec<String>>,
    styles: Option<Vec<String>>,
    images: Option<Vec<String>>,
    deps: Vec<String>,
    init: Option<String>,
}

impl PluginBuilder {
    /// Declare auxiliary scripts.
    pub fn scripts<I, S>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts = Some(scripts.into_iter().map(Into::into).collect());
        self
    }

    /// Declare stylesheets.
    pub fn styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.styles = Some(styles.into_iter().map(Into::into).collect());
        self
    }

    /// Declare images.
    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the modules this plugin requires at load time.
    pub fn deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Script run once the plugin and its dependencies have loaded.
    pub fn init(mut self, init: impl Into<String>) -> Self {
        self.init = Some(init.into());
        self
    }

    /// Resolve every declared resource and build the plugin.
    pub fn build(self, layout: &AssetLayout) -> PluginResult<Plugin> {
        validate_name(&self.name)?;

        let main_entry = self.main.trim();
        if main_entry.is_empty() || main_entry == WILDCARD {
            return Err(PluginError::InvalidDeclaration(format!(
                "plugin '{}' needs exactly one main script",
                self.name
            )));
        }

        let main = resolve(layout, &self.name, ResourceKind::Js, &[main_entry.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PluginError::InvalidDeclaration(format!("plugin '{}' has no main script", self.name))
            })?;

        let scripts: Vec<Resource> = resolve_declared(layout, &self.name, ResourceKind::Js, self.scripts)?
            .into_iter()
            .filter(|script| *script != main)
            .collect();
        let styles = resolve_declared(layout, &self.name, ResourceKind::Css, self.styles)?;
        let images = resolve_declared(layout, &self.name, ResourceKind::Images, self.images)?;

        let mut deps: Vec<String> = Vec::new();
        for dep in self.deps {
            let dep = dep.trim().to_string();
            if dep.is_empty() || dep == self.name || deps.contains(&dep) {
                continue;
            }
            deps.push(dep);
        }

        let init = self.init.filter(|init| !init.trim().is_empty());

        tracing::debug!(
            plugin = %self.name,
            main = %main,
            scripts = scripts.len(),
            styles = styles.len(),
            images = images.len(),
            "Built plugin"
        );

        Ok(Plugin { name: self.name, main, scripts, styles, images, deps, init, layout: layout.clone() })
    }
}

fn resolve_declared(
    layout: &AssetLayout,
    name: &str,
    kind: ResourceKind,
    declared: Option<Vec<String>>,
) -> PluginResult<Vec<Resource>> {
    resolve(layout, name, kind, declared.as_deref().unwrap_or_default())
}

fn validate_name(name: &str) -> PluginResult<()> {
    if name.is_empty() {
        return Err(PluginError::InvalidDeclaration("Plugin name is required".to_string()));
    }

    if !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.') {
        return Err(PluginError::InvalidDeclaration(format!(
            "Plugin name '{name}' must contain only alphanumeric characters, dots, hyphens, and underscores"
        )));
    }

    Ok(())
}

impl Plugin {
    /// Start declaring a plugin with its primary script.
    pub fn builder(name: impl Into<String>, main: impl Into<String>) -> PluginBuilder {
        PluginBuilder { name: name.into(), main: main.into(), ..PluginBuilder::default() }
    }

    /// Plugin name; also its module identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primary script.
    pub fn main(&self) -> &Resource {
        &self.main
    }

    /// Auxiliary scripts, excluding the primary script.
    pub fn scripts(&self) -> &[Resource] {
        &self.scripts
    }

    /// Stylesheets.
    pub fn styles(&self) -> &[Resource] {
        &self.styles
    }

    /// Images. Installed but never referenced by emitted code.
    pub fn images(&self) -> &[Resource] {
        &self.images
    }

    /// Modules required before this plugin's scripts run.
    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    /// Initialisation script.
    pub fn init(&self) -> Option<&str> {
        self.init.as_deref()
    }

    /// Every resource of the plugin.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        std::iter::once(&self.main).chain(&self.scripts).chain(&self.styles).chain(&self.images)
    }

    /// Copy packaged resources to `<root>/<base>/<plugin>/<kind>/...`.
    ///
    /// External resources are skipped. Existing files are overwritten.
    /// Returns the number of files copied.
    pub fn install(&self, root: &Path) -> PluginResult<usize> {
        let mut copied = 0;

        for resource in self.resources() {
            let Resource::Packaged(relative) = resource else {
                continue;
            };

            let source = resource
                .source_path(&self.layout.static_root)
                .ok_or_else(|| PluginError::InvalidDeclaration(relative.clone()))?;

            let mut dest = self.layout.base.split('/').fold(root.to_path_buf(), |p, s| p.join(s));
            let mut segments: Vec<&str> = relative.split('/').collect();
            let file_name = segments.pop().unwrap_or_default();
            for segment in segments {
                dest.push(segment);
            }

            std::fs::create_dir_all(&dest)?;
            std::fs::copy(&source, dest.join(file_name))?;
            copied += 1;

            tracing::debug!(plugin = %self.name, resource = %relative, dest = ?dest, "Installed resource");
        }

        Ok(copied)
    }

    /// Public URL of a resource.
    ///
    /// External resources are returned unchanged; packaged ones become an
    /// absolute path under the deployment base.
    pub fn to_url(&self, resource: &Resource) -> String {
        match resource {
            Resource::External(url) => url.clone(),
            Resource::Packaged(path) => {
                let encoded: Vec<String> = self
                    .layout
                    .base
                    .split('/')
                    .chain(path.split('/'))
                    .filter(|s| !s.is_empty())
                    .map(|s| urlencoding::encode(s).into_owned())
                    .collect();
                format!("/{}", encoded.join("/"))
            }
        }
    }

    /// Module-loader path of the primary script (URL without `.js`).
    pub fn module_url(&self) -> String {
        let url = self.to_url(&self.main);
        match url.strip_suffix(".js") {
            Some(stripped) => stripped.to_string(),
            None => url,
        }
    }

    /// Module-loader configuration: the plugin's path plus its shim graph.
    ///
    /// Auxiliary scripts depend on the primary module and on every dependency
    /// of the plugin.
    pub fn loader_config(&self) -> Value {
        let mut paths = Map::new();
        paths.insert(self.name.clone(), Value::String(self.module_url()));

        let own_deps = strings(self.deps.iter());
        let aux_deps = strings(std::iter::once(&self.name).chain(&self.deps));

        let mut shim = Map::new();
        shim.insert(self.name.clone(), shim_entry(own_deps));
        for script in &self.scripts {
            shim.insert(self.to_url(script), shim_entry(aux_deps.clone()));
        }

        let mut config = Map::new();
        config.insert("paths".to_string(), Value::Object(paths));
        config.insert("shim".to_string(), Value::Object(shim));
        Value::Object(config)
    }

    /// Browser-side load instructions for this plugin.
    pub fn enable(&self) -> Activation {
        let styles = self.styles.iter().map(|style| self.to_url(style)).collect();

        let init = if self.init.is_some() || !self.scripts.is_empty() {
            let modules: Vec<String> = std::iter::once(self.name.clone())
                .chain(self.deps.iter().cloned())
                .chain(self.scripts.iter().map(|script| self.to_url(script)))
                .collect();
            let params =
                binding_names(std::iter::once(self.name.as_str()).chain(self.deps.iter().map(String::as_str)));
            Some(require_call(&modules, &params, self.init.as_deref().unwrap_or_default()))
        } else {
            None
        };

        Activation { name: self.name.clone(), styles, config: self.loader_config(), init }
    }
}

fn strings<'a>(items: impl Iterator<Item = &'a String>) -> Vec<Value> {
    items.cloned().map(Value::String).collect()
}

fn shim_entry(deps: Vec<Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("deps".to_string(), Value::Array(deps));
    Value::Object(entry)
}
