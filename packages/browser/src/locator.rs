//! Structural element locators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A structural query identifying DOM elements.
///
/// Deserializes from a single-key table, e.g. `{ class = "title" }` or
/// `{ css = "span.fare" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// A single class name (no leading dot).
    Class(String),
    /// A raw CSS selector.
    Css(String),
    /// A tag name.
    Tag(String),
}

impl Locator {
    /// Locator matching elements carrying class `name`.
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::Class(name.to_owned())
    }

    /// Locator matching the CSS selector `selector`.
    #[must_use]
    pub fn css(selector: &str) -> Self {
        Self::Css(selector.to_owned())
    }

    /// Locator matching elements with tag `name`.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self::Tag(name.to_owned())
    }

    /// The equivalent CSS selector.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::Css(selector) => selector.clone(),
            Self::Tag(name) => name.clone(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "class '{name}'"),
            Self::Css(selector) => write!(f, "selector '{selector}'"),
            Self::Tag(name) => write!(f, "tag '{name}'"),
        }
    }
}
