//! Browser-side activation scripts.
//!
//! Enabling a plugin produces an [`Activation`]: stylesheet injections, a
//! module-loader (`require.config`) call registering the plugin's module path
//! and shim graph, and optionally a `require` call running the plugin's
//! initialisation code once its dependencies have loaded.
//!
//! Several activations are rendered section by section, so every stylesheet
//! is injected and every loader configuration is registered before any
//! module is requested.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// A script payload handed to the notebook display runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Javascript(String);

impl Javascript {
    /// Wrap script text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Script text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the payload, returning the script text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the payload contains no script.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Display-protocol bundle keyed by MIME type.
    pub fn to_mime_bundle(&self) -> Value {
        let mut bundle = Map::new();
        bundle.insert("application/javascript".to_string(), Value::String(self.0.clone()));
        Value::Object(bundle)
    }
}

impl std::fmt::Display for Javascript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Load instructions for one plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// Plugin name.
    pub name: String,
    /// Stylesheet URLs to inject.
    pub styles: Vec<String>,
    /// Module-loader configuration (`{paths, shim}`).
    pub config: Value,
    /// Module-load call running the plugin's initialisation, if any.
    pub init: Option<String>,
}

impl Activation {
    /// Style injection statements, one per stylesheet.
    pub fn style_script(&self) -> String {
        self.styles.iter().map(|href| style_injection(href)).collect::<Vec<_>>().join("\n")
    }

    /// The `require.config(...)` statement.
    pub fn config_script(&self) -> String {
        format!("require.config({});", self.config)
    }

    /// Render this activation alone.
    pub fn render(&self) -> Javascript {
        render_all(std::slice::from_ref(self))
    }
}

/// Render activations as one script: styles, then configs, then inits.
pub fn render_all(activations: &[Activation]) -> Javascript {
    let mut lines: Vec<String> = Vec::new();

    lines.extend(activations.iter().filter(|a| !a.styles.is_empty()).map(Activation::style_script));
    lines.extend(activations.iter().map(Activation::config_script));
    lines.extend(activations.iter().filter_map(|a| a.init.clone()));

    Javascript::new(lines.join("\n"))
}

/// A `require` call loading `modules` and running `body` once they are ready.
///
/// Loaded modules are bound positionally to `params`; modules past the end of
/// `params` load but stay unbound.
pub fn require_call(modules: &[String], params: &[String], body: &str) -> String {
    let modules = Value::Array(modules.iter().cloned().map(Value::String).collect());
    let body = body.trim();
    if body.is_empty() {
        format!("require({}, function({}) {{}});", modules, params.join(", "))
    } else {
        format!("require({}, function({}) {{ {} }});", modules, params.join(", "), body)
    }
}

/// Statement appending a stylesheet link to the document head.
pub fn style_injection(href: &str) -> String {
    format!(
        "(function(href) {{ var link = document.createElement(\"link\"); link.rel = \"stylesheet\"; link.href = href; document.head.appendChild(link); }})({});",
        Value::String(href.to_string())
    )
}

/// JavaScript identifier a module is bound to: the last path segment of its
/// name, with characters invalid in identifiers replaced by `_`.
pub fn binding_name(module: &str) -> String {
    let last = module.trim_end_matches('/').rsplit('/').next().unwrap_or(module);

    let mut ident: String = last
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }

    ident
}

/// Distinct bindings for `modules`, in order. A binding already taken by an
/// earlier module gets a numeric suffix.
pub fn binding_names<'a>(modules: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut params = Vec::new();

    for module in modules {
        let base = binding_name(module);
        let mut ident = base.clone();
        let mut n = 2;
        while !taken.insert(ident.clone()) {
            ident = format!("{base}_{n}");
            n += 1;
        }
        params.push(ident);
    }

    params
}

/// Words that cannot name a function parameter in strict-mode JavaScript.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "eval", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];
