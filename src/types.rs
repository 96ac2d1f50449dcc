use std::fmt;

use serde::{Deserialize, Serialize};

/// How to find an element: a lookup strategy plus a selector string.
///
/// A `Locator` describes an element without resolving it. It is compared by
/// value, so the same locator can be probed repeatedly or kept in candidate
/// lists without touching the session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "strategy", content = "selector")]
pub enum Locator {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Exact anchor text
    LinkText(String),
    /// Tag name (resolved as a CSS type selector)
    Tag(String),
}

impl Locator {
    /// Locator for a CSS selector.
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    /// Locator for an XPath expression.
    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    /// Locator for an element id.
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    /// Locator for a link by its exact text.
    pub fn link_text(text: impl Into<String>) -> Self {
        Locator::LinkText(text.into())
    }

    /// Locator for a tag name, e.g. `html` or `input`.
    pub fn tag(name: impl Into<String>) -> Self {
        Locator::Tag(name.into())
    }

    /// The raw selector string, without the strategy.
    pub fn selector(&self) -> &str {
        match self {
            Locator::Css(s)
            | Locator::XPath(s)
            | Locator::Id(s)
            | Locator::LinkText(s)
            | Locator::Tag(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
            Locator::Id(s) => write!(f, "id `{}`", s),
            Locator::LinkText(s) => write!(f, "link text `{}`", s),
            Locator::Tag(s) => write!(f, "tag `{}`", s),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
