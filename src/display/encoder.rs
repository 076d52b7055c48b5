//! JSON encoding with raw script fragments.
//!
//! [`JsValue`] mirrors a JSON value with one extra variant, [`JsValue::Raw`],
//! whose text is emitted verbatim. This lets option objects carry unquoted
//! script expressions (function references, library constants) while every
//! ordinary string is still fully quoted and escaped:
//!
//! ```
//! use cellframe::display::JsValue;
//!
//! let mut options = JsValue::object();
//! options.insert("rows", JsValue::from(vec![JsValue::from("region")]));
//! options.insert("renderers", JsValue::raw("$.pivotUtilities.c3_renderers"));
//!
//! assert_eq!(options.encode(), r#"{"rows":["region"],"renderers":$.pivotUtilities.c3_renderers}"#);
//! ```

use std::fmt::Write;

use serde::Serialize;
use serde_json::{Number, Value};

/// A JSON value that may contain raw script fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    /// `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string, quoted on output.
    String(String),
    /// An array.
    Array(Vec<JsValue>),
    /// An object; keys keep insertion order.
    Object(Vec<(String, JsValue)>),
    /// Script text emitted without quoting.
    Raw(String),
}

impl JsValue {
    /// A raw script fragment.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into())
    }

    /// An empty object.
    pub fn object() -> Self {
        Self::Object(Vec::new())
    }

    /// Convert any serializable value. Serialization failures are returned,
    /// never coerced.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Set `key` on an object, replacing an existing entry in place.
    ///
    /// Returns `false` (and does nothing) when `self` is not an object.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsValue>) -> bool {
        let Self::Object(entries) = self else {
            return false;
        };

        let key = key.into();
        let value = value.into();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => entries.push((key, value)),
        }
        true
    }

    /// Look up `key` on an object.
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compact encoding.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Number(n) => {
                let _ = write!(out, "{n}");
            }
            Self::String(s) => write_quoted(out, s),
            Self::Raw(fragment) => out.push_str(fragment),
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_to(out);
                }
                out.push(']');
            }
            Self::Object(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write_quoted(out, key);
                    out.push(':');
                    value.write_to(out);
                }
                out.push('}');
            }
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    let _ = write!(out, "{}", Value::from(s));
}

impl std::fmt::Display for JsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Value> for JsValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for JsValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Vec<JsValue>> for JsValue {
    fn from(items: Vec<JsValue>) -> Self {
        Self::Array(items)
    }
}
