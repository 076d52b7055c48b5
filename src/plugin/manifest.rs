//! Plugin declarations.
//!
//! A declaration names a plugin's primary script and, optionally, its
//! auxiliary scripts, stylesheets, images, dependencies and initialisation
//! code. Every list accepts either a single string or a list of strings:
//!
//! ```toml
//! [[plugins]]
//! name = "pivot"
//! main = "pivot.min.js"
//! deps = ["jquery", "jqueryui"]
//!
//! [[plugins]]
//! name = "google"
//! main = "//www.google.com/jsapi"
//! init = "google.load('visualization', '1.0', {'packages': ['corechart']});"
//! ```

use serde::{Deserialize, Serialize};

use super::{AssetLayout, Plugin, PluginResult};

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single entry.
    One(String),
    /// Several entries.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Entries as a list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// Declaration of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    /// Plugin name (unique identifier).
    pub name: String,
    /// Primary script.
    pub main: String,
    /// Auxiliary scripts; discovered when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<OneOrMany>,
    /// Stylesheets; discovered when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<OneOrMany>,
    /// Images; discovered when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<OneOrMany>,
    /// Modules required at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deps: Option<OneOrMany>,
    /// Initialisation script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<String>,
}

impl PluginSpec {
    /// Declaration with only a primary script.
    pub fn new(name: impl Into<String>, main: impl Into<String>) -> Self {
        Self { name: name.into(), main: main.into(), scripts: None, styles: None, images: None, deps: None, init: None }
    }

    /// Set dependencies.
    pub fn with_deps(mut self, deps: impl Into<OneOrMany>) -> Self {
        self.deps = Some(deps.into());
        self
    }

    /// Resolve the declaration against the static tree.
    pub fn build(&self, layout: &AssetLayout) -> PluginResult<Plugin> {
        let mut builder = Plugin::builder(&self.name, &self.main);

        if let Some(scripts) = &self.scripts {
            builder = builder.scripts(scripts.clone().into_vec());
        }
        if let Some(styles) = &self.styles {
            builder = builder.styles(styles.clone().into_vec());
        }
        if let Some(images) = &self.images {
            builder = builder.images(images.clone().into_vec());
        }
        if let Some(deps) = &self.deps {
            builder = builder.deps(deps.clone().into_vec());
        }
        if let Some(init) = &self.init {
            builder = builder.init(init);
        }

        builder.build(layout)
    }
}

/// Built-in plugin declarations, in registration order.
pub fn builtin_specs() -> Vec<PluginSpec> {
    vec![
        PluginSpec::new("datatables", "jquery.dataTables.min.js").with_deps("jquery"),
        PluginSpec::new("d3", "d3.min.js"),
        PluginSpec::new("c3", "c3.min.js").with_deps("d3"),
        PluginSpec::new("pivot", "pivot.min.js").with_deps(vec!["jquery", "jqueryui", "d3", "c3"]),
        PluginSpec::new("selectize", "selectize.min.js").with_deps("jquery"),
    ]
}

/// Merge user declarations over `base`: a declaration with an existing name
/// replaces it in place, new names are appended.
pub fn merge_specs(base: Vec<PluginSpec>, overrides: Vec<PluginSpec>) -> Vec<PluginSpec> {
    let mut merged = base;

    for spec in overrides {
        if let Some(existing) = merged.iter_mut().find(|s| s.name == spec.name) {
            tracing::warn!(plugin = %spec.name, "Overriding built-in plugin declaration");
            *existing = spec;
        } else {
            merged.push(spec);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Declarations {
        plugins: Vec<PluginSpec>,
    }

    const SAMPLE: &str = r#"
[[plugins]]
name = "pivot"
main = "pivot.min.js"
scripts = "d3_renderers.min.js"
deps = ["jquery", "jqueryui"]

[[plugins]]
name = "google"
main = "//www.google.com/jsapi"
init = "google.load('visualization', '1.0');"
"#;

    #[test]
    fn test_parse_string_or_list() {
        let parsed: Declarations = toml::from_str(SAMPLE).unwrap();

        let pivot = &parsed.plugins[0];
        assert_eq!(pivot.scripts, Some(OneOrMany::One("d3_renderers.min.js".to_string())));
        assert_eq!(
            pivot.deps.clone().map(OneOrMany::into_vec),
            Some(vec!["jquery".to_string(), "jqueryui".to_string()])
        );
        assert!(pivot.styles.is_none());

        let google = &parsed.plugins[1];
        assert_eq!(google.init.as_deref(), Some("google.load('visualization', '1.0');"));
        assert!(google.deps.is_none());
    }

    #[test]
    fn test_build_external_spec() {
        let parsed: Declarations = toml::from_str(SAMPLE).unwrap();
        let layout = AssetLayout::new(std::env::temp_dir().join("cellframe-missing-static-root"));

        let google = parsed.plugins[1].build(&layout).unwrap();
        assert_eq!(google.name(), "google");
        assert!(google.main().is_external());
        assert!(google.init().is_some());
    }

    #[test]
    fn test_builtin_specs() {
        let specs = builtin_specs();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["datatables", "d3", "c3", "pivot", "selectize"]);

        let c3 = &specs[2];
        assert_eq!(c3.deps, Some(OneOrMany::One("d3".to_string())));
    }

    #[test]
    fn test_merge_specs() {
        let overrides = vec![
            PluginSpec::new("d3", "//cdn.example.com/d3.v7.min.js"),
            PluginSpec::new("leaflet", "leaflet.js"),
        ];

        let merged = merge_specs(builtin_specs(), overrides);
        assert_eq!(merged.len(), 6);
        assert_eq!(merged[1].name, "d3");
        assert_eq!(merged[1].main, "//cdn.example.com/d3.v7.min.js");
        assert_eq!(merged[5].name, "leaflet");
    }
}
