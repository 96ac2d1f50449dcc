use tracing::trace;

use crate::errors::Error;
use crate::session::{Session, SessionError};
use crate::types::Locator;

/// Stateless predicates over the session's current state.
///
/// Every check reads once, with no retry; pair with [`crate::Wait`] when a
/// predicate needs to *become* true. Each predicate has a locator entry
/// point and an element-handle entry point (`element_*`).
///
/// Absence is an answer, not an error: a locator that matches nothing or a
/// handle that has gone stale reads as `false`. Only genuine driver faults
/// surface as `Err`.
pub struct Probe<'s, S: Session> {
    session: &'s S,
}

impl<'s, S: Session> Probe<'s, S> {
    /// Probe against `session`.
    pub fn new(session: &'s S) -> Self {
        Self { session }
    }

    /// Does `locator` currently match at least one element?
    pub async fn present(&self, locator: &Locator) -> Result<bool, Error> {
        match self.session.find_all(locator).await {
            Ok(elements) => {
                trace!("{} matched {} element(s)", locator, elements.len());
                Ok(!elements.is_empty())
            }
            Err(e) => fold_absence(e),
        }
    }

    /// Is the resolved element still attached to the document?
    ///
    /// Checked by reading the tag name, the cheapest introspection the
    /// driver offers; a stale or missing handle reads as `false`.
    pub async fn element_present(&self, element: &S::Element) -> Result<bool, Error> {
        match self.session.tag_name(element).await {
            Ok(_) => Ok(true),
            Err(e) => fold_absence(e),
        }
    }

    /// Is the first element matching `locator` displayed?
    ///
    /// Uses the driver's native visibility computation (layout + CSS).
    /// No match means not visible.
    pub async fn visible(&self, locator: &Locator) -> Result<bool, Error> {
        let elements = match self.session.find_all(locator).await {
            Ok(elements) => elements,
            Err(e) => return fold_absence(e),
        };
        let Some(first) = elements.first() else {
            return Ok(false);
        };
        self.element_visible(first).await
    }

    /// Is the resolved element displayed?
    pub async fn element_visible(&self, element: &S::Element) -> Result<bool, Error> {
        match self.session.is_displayed(element).await {
            Ok(displayed) => Ok(displayed),
            Err(e) => fold_absence(e),
        }
    }

    /// Is every element matching `locator` hidden, or the match empty?
    ///
    /// The negation used by disappearance waits: true when the locator
    /// matches nothing, or its first match is not displayed.
    pub async fn invisible(&self, locator: &Locator) -> Result<bool, Error> {
        Ok(!self.visible(locator).await?)
    }

    /// Does the first element matching `locator` render any non-blank text?
    pub async fn has_any_text(&self, locator: &Locator) -> Result<bool, Error> {
        let elements = match self.session.find_all(locator).await {
            Ok(elements) => elements,
            Err(e) => return fold_absence(e),
        };
        let Some(first) = elements.first() else {
            return Ok(false);
        };
        self.element_has_any_text(first).await
    }

    /// Does the resolved element render any non-blank text?
    pub async fn element_has_any_text(&self, element: &S::Element) -> Result<bool, Error> {
        match self.session.text(element).await {
            Ok(text) => Ok(!text.trim().is_empty()),
            Err(e) => fold_absence(e),
        }
    }

    /// Is the first element matching `locator` marked read-only?
    pub async fn readonly(&self, locator: &Locator) -> Result<bool, Error> {
        let elements = match self.session.find_all(locator).await {
            Ok(elements) => elements,
            Err(e) => return fold_absence(e),
        };
        let Some(first) = elements.first() else {
            return Ok(false);
        };
        self.element_readonly(first).await
    }

    /// Is the resolved element marked read-only?
    ///
    /// True when the `readonly` attribute is present and parses as boolean
    /// true; an absent attribute is `false`.
    pub async fn element_readonly(&self, element: &S::Element) -> Result<bool, Error> {
        match self.session.attr(element, "readonly").await {
            Ok(value) => Ok(attr_is_true(value.as_deref())),
            Err(e) => fold_absence(e),
        }
    }
}

/// Boolean-attribute parse: present and `"true"` (any ASCII case) is true,
/// anything else is false.
pub(crate) fn attr_is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Absence and staleness become `false`; real driver faults propagate.
fn fold_absence(err: SessionError) -> Result<bool, Error> {
    match err {
        SessionError::NoSuchElement | SessionError::StaleReference => Ok(false),
        driver => Err(driver.into()),
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod probe_test;
