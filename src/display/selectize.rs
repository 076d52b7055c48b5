//! Multi-select widget state.
//!
//! The widget is rendered by the notebook's front end (`SelectizeView`,
//! backed by the `selectize` plugin); this module only describes and
//! validates the state synchronised with it.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{DisplayError, DisplayResult};

/// Front-end view rendering the widget.
pub const SELECTIZE_VIEW: &str = "SelectizeView";

/// State of a multi-select widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selectize {
    /// Front-end view name.
    #[serde(rename = "_view_name")]
    pub view_name: String,
    /// Selectable values.
    pub options: Vec<String>,
    /// Selected values.
    pub value: Vec<String>,
    /// Allow the user to create new items.
    pub create: bool,
    /// Regular expression that created items must match.
    pub create_filter: String,
    /// Keep created items after they are deselected.
    pub persist: bool,
    /// Max number of items the user can select (0 = unlimited).
    pub max_items: usize,
    /// Allow an empty selection.
    pub allow_empty: bool,
}

impl Default for Selectize {
    fn default() -> Self {
        Self {
            view_name: SELECTIZE_VIEW.to_string(),
            options: Vec::new(),
            value: Vec::new(),
            create: false,
            create_filter: String::new(),
            persist: false,
            max_items: 0,
            allow_empty: true,
        }
    }
}

impl Selectize {
    /// Widget offering `options`, with nothing selected.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { options: options.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Set the selection.
    pub fn with_value<I, S>(mut self, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value = value.into_iter().map(Into::into).collect();
        self
    }

    /// Check the selection against the widget's constraints.
    pub fn validate(&self) -> DisplayResult<()> {
        if !self.create_filter.is_empty() {
            Regex::new(&self.create_filter).map_err(|e| {
                DisplayError::InvalidSelection(format!("invalid create filter '{}': {e}", self.create_filter))
            })?;
        }

        if self.value.is_empty() {
            if self.allow_empty {
                return Ok(());
            }
            return Err(DisplayError::InvalidSelection("a value must be selected".to_string()));
        }

        if self.max_items > 0 && self.value.len() > self.max_items {
            return Err(DisplayError::InvalidSelection(format!(
                "{} items selected, at most {} allowed",
                self.value.len(),
                self.max_items
            )));
        }

        if let Some(unknown) = self.value.iter().find(|v| !self.options.contains(v)) {
            return Err(DisplayError::InvalidSelection(format!("'{unknown}' is not one of the options")));
        }

        Ok(())
    }

    /// Widget state as sent to the front end.
    pub fn state(&self) -> DisplayResult<serde_json::Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_allowed_by_default() {
        assert!(Selectize::new(["a", "b"]).validate().is_ok());
    }

    #[test]
    fn test_empty_selection_rejected() {
        let widget = Selectize { allow_empty: false, ..Selectize::new(["a"]) };
        assert!(matches!(widget.validate(), Err(DisplayError::InvalidSelection(_))));
    }

    #[test]
    fn test_value_must_be_an_option() {
        assert!(Selectize::new(["a", "b"]).with_value(["b"]).validate().is_ok());
        assert!(Selectize::new(["a", "b"]).with_value(["c"]).validate().is_err());
    }

    #[test]
    fn test_max_items() {
        let widget = Selectize { max_items: 1, ..Selectize::new(["a", "b"]).with_value(["a", "b"]) };
        assert!(widget.validate().is_err());
    }

    #[test]
    fn test_invalid_create_filter() {
        let widget = Selectize { create: true, create_filter: "([a-z".to_string(), ..Selectize::new(["a"]) };
        assert!(widget.validate().is_err());
    }

    #[test]
    fn test_state_field_names() {
        let state = Selectize::new(["a"]).with_value(["a"]).state().unwrap();

        assert_eq!(state["_view_name"], "SelectizeView");
        assert_eq!(state["createFilter"], "");
        assert_eq!(state["maxItems"], 0);
        assert_eq!(state["allowEmpty"], true);
        assert_eq!(state["value"][0], "a");
    }
}
