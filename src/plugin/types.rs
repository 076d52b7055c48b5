//! Core plugin types.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches absolute (`http://`, `https://`) and scheme-relative (`//`) URLs.
static EXTERNAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(https?:)?//").unwrap());

/// Default deployment base, relative to the deployment root.
pub const DEFAULT_BASE: &str = "nbextensions/cellframe";

/// Declaration entry meaning "every packaged file of this kind".
pub const WILDCARD: &str = "*";

/// Check whether a declared entry refers to an externally hosted resource.
pub fn is_external(entry: &str) -> bool {
    EXTERNAL_RE.is_match(entry)
}

/// Kind of static resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Script bundles.
    Js,
    /// Stylesheets.
    Css,
    /// Images referenced by stylesheets.
    Images,
}

impl ResourceKind {
    /// Directory name of this kind inside a plugin's static tree.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Css => "css",
            Self::Images => "images",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// A resolved plugin resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Externally hosted; referenced by URL and never installed.
    External(String),
    /// Packaged file, relative to the static root with `/` separators
    /// (`<plugin>/<kind>/<path>`).
    Packaged(String),
}

impl Resource {
    /// Classify a declared entry that has already been made relative to the
    /// static root.
    pub fn from_entry(entry: impl Into<String>) -> Self {
        let entry = entry.into();
        if is_external(&entry) {
            Self::External(entry)
        } else {
            Self::Packaged(entry.replace('\\', "/"))
        }
    }

    /// Whether the resource is externally hosted.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// The raw entry: URL for external resources, relative path otherwise.
    pub fn as_str(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Packaged(path) => path,
        }
    }

    /// Location of a packaged resource on disk, relative to `root`.
    pub fn source_path(&self, root: &Path) -> Option<PathBuf> {
        match self {
            Self::External(_) => None,
            Self::Packaged(path) => Some(path.split('/').fold(root.to_path_buf(), |p, s| p.join(s))),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem layout shared by every plugin: where packaged assets live and
/// under which base they are deployed and served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    /// Root of the packaged static-asset tree.
    pub static_root: PathBuf,
    /// Deployment base, relative to the deployment root and the server root.
    pub base: String,
}

impl AssetLayout {
    /// Create a layout with the default deployment base.
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self { static_root: static_root.into(), base: DEFAULT_BASE.to_string() }
    }

    /// Override the deployment base. Leading and trailing slashes are dropped.
    pub fn with_base(mut self, base: impl AsRef<str>) -> Self {
        self.base = normalize_base(base.as_ref());
        self
    }
}

fn normalize_base(base: &str) -> String {
    base.replace('\\', "/").trim_matches('/').to_string()
}
