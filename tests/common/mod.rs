//! In-memory driver fake shared by the integration suites.
//!
//! Real window handles and elements cannot be constructed outside a live
//! WebDriver session, so the suites drive the synchronization layer through
//! this `Session` implementation instead. Appearance and disappearance are
//! scheduled on the Tokio clock, which the tests keep paused.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;
use webwait::{Locator, Session, SessionError};

#[derive(Debug)]
struct ElementData {
    tag: String,
    text: String,
    attrs: HashMap<String, String>,
    displayed: bool,
    show_at: Option<Instant>,
    hide_at: Option<Instant>,
    stale: bool,
}

/// A fake resolved-element handle. Clones share state, like real driver
/// handles referring to the same DOM node.
#[derive(Clone, Debug)]
pub struct FakeElement {
    data: Arc<Mutex<ElementData>>,
}

impl FakeElement {
    /// A displayed element with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            data: Arc::new(Mutex::new(ElementData {
                tag: tag.to_string(),
                text: String::new(),
                attrs: HashMap::new(),
                displayed: true,
                show_at: None,
                hide_at: None,
                stale: false,
            })),
        }
    }

    /// An element that exists but is not displayed.
    pub fn hidden(tag: &str) -> Self {
        let element = Self::new(tag);
        element.data.lock().unwrap().displayed = false;
        element
    }

    pub fn with_text(self, text: &str) -> Self {
        self.data.lock().unwrap().text = text.to_string();
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.data
            .lock()
            .unwrap()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Displayed only once `delay` has elapsed on the Tokio clock.
    pub fn showing_after(self, delay: Duration) -> Self {
        self.data.lock().unwrap().show_at = Some(Instant::now() + delay);
        self
    }

    /// Hidden once `delay` has elapsed on the Tokio clock.
    pub fn hiding_after(self, delay: Duration) -> Self {
        self.data.lock().unwrap().hide_at = Some(Instant::now() + delay);
        self
    }

    pub fn set_displayed(&self, displayed: bool) {
        self.data.lock().unwrap().displayed = displayed;
    }

    /// Detach the handle, as if the node were removed from the document.
    pub fn mark_stale(&self) {
        self.data.lock().unwrap().stale = true;
    }

    fn is_stale(&self) -> bool {
        self.data.lock().unwrap().stale
    }

    fn displayed_now(&self) -> bool {
        let data = self.data.lock().unwrap();
        let now = Instant::now();
        if let Some(hide_at) = data.hide_at
            && now >= hide_at
        {
            return false;
        }
        if let Some(show_at) = data.show_at {
            return now >= show_at;
        }
        data.displayed
    }
}

struct ElementEntry {
    locator: Locator,
    element: FakeElement,
    appears_at: Option<Instant>,
    vanishes_at: Option<Instant>,
}

struct WindowEntry {
    handle: String,
    url: Url,
    appears_at: Option<Instant>,
}

#[derive(Default)]
struct State {
    elements: Vec<ElementEntry>,
    windows: Vec<WindowEntry>,
    active: Option<String>,
    switch_log: Vec<String>,
    lookup_fault: Option<String>,
}

/// In-memory `Session`: elements keyed by locator, windows in insertion
/// order, one active handle, and a log of every switch.
#[derive(Default)]
pub struct FakeSession {
    state: Mutex<State>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&self, locator: Locator, element: FakeElement) {
        self.state.lock().unwrap().elements.push(ElementEntry {
            locator,
            element,
            appears_at: None,
            vanishes_at: None,
        });
    }

    /// Element that enters the document after `delay` on the Tokio clock.
    pub fn add_element_after(&self, locator: Locator, element: FakeElement, delay: Duration) {
        self.state.lock().unwrap().elements.push(ElementEntry {
            locator,
            element,
            appears_at: Some(Instant::now() + delay),
            vanishes_at: None,
        });
    }

    /// Element that leaves the document after `delay` on the Tokio clock.
    pub fn add_element_vanishing_after(
        &self,
        locator: Locator,
        element: FakeElement,
        delay: Duration,
    ) {
        self.state.lock().unwrap().elements.push(ElementEntry {
            locator,
            element,
            appears_at: None,
            vanishes_at: Some(Instant::now() + delay),
        });
    }

    pub fn add_window(&self, handle: &str, url: &str) {
        self.state.lock().unwrap().windows.push(WindowEntry {
            handle: handle.to_string(),
            url: Url::parse(url).expect("test URL must parse"),
            appears_at: None,
        });
    }

    /// Window whose handle registers only after `delay` on the Tokio clock.
    pub fn add_window_after(&self, handle: &str, url: &str, delay: Duration) {
        self.state.lock().unwrap().windows.push(WindowEntry {
            handle: handle.to_string(),
            url: Url::parse(url).expect("test URL must parse"),
            appears_at: Some(Instant::now() + delay),
        });
    }

    pub fn set_active(&self, handle: &str) {
        self.state.lock().unwrap().active = Some(handle.to_string());
    }

    /// Handle the session is currently directed at, if any.
    pub fn active(&self) -> Option<String> {
        self.state.lock().unwrap().active.clone()
    }

    /// How many times the active window was redirected.
    pub fn switch_count(&self) -> usize {
        self.state.lock().unwrap().switch_log.len()
    }

    /// Make every element lookup fail with a driver fault.
    pub fn fail_lookups_with(&self, message: &str) {
        self.state.lock().unwrap().lookup_fault = Some(message.to_string());
    }
}

#[async_trait]
impl Session for FakeSession {
    type Element = FakeElement;
    type Window = String;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, SessionError> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.lookup_fault {
            return Err(SessionError::Driver(anyhow::anyhow!("{}", message)));
        }

        let now = Instant::now();
        Ok(state
            .elements
            .iter()
            .filter(|entry| {
                entry.locator == *locator
                    && entry.appears_at.is_none_or(|t| now >= t)
                    && entry.vanishes_at.is_none_or(|t| now < t)
                    && !entry.element.is_stale()
            })
            .map(|entry| entry.element.clone())
            .collect())
    }

    async fn tag_name(&self, element: &FakeElement) -> Result<String, SessionError> {
        if element.is_stale() {
            return Err(SessionError::StaleReference);
        }
        Ok(element.data.lock().unwrap().tag.clone())
    }

    async fn is_displayed(&self, element: &FakeElement) -> Result<bool, SessionError> {
        if element.is_stale() {
            return Err(SessionError::StaleReference);
        }
        Ok(element.displayed_now())
    }

    async fn text(&self, element: &FakeElement) -> Result<String, SessionError> {
        if element.is_stale() {
            return Err(SessionError::StaleReference);
        }
        Ok(element.data.lock().unwrap().text.clone())
    }

    async fn attr(
        &self,
        element: &FakeElement,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        if element.is_stale() {
            return Err(SessionError::StaleReference);
        }
        Ok(element.data.lock().unwrap().attrs.get(name).cloned())
    }

    async fn windows(&self) -> Result<Vec<String>, SessionError> {
        let state = self.state.lock().unwrap();
        let now = Instant::now();
        Ok(state
            .windows
            .iter()
            .filter(|entry| entry.appears_at.is_none_or(|t| now >= t))
            .map(|entry| entry.handle.clone())
            .collect())
    }

    async fn active_window(&self) -> Result<String, SessionError> {
        self.state
            .lock()
            .unwrap()
            .active
            .clone()
            .ok_or_else(|| SessionError::Driver(anyhow::anyhow!("no active window")))
    }

    async fn switch_to_window(&self, window: &String) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        state.active = Some(window.clone());
        state.switch_log.push(window.clone());
        Ok(())
    }

    async fn current_url(&self) -> Result<Url, SessionError> {
        let state = self.state.lock().unwrap();
        let active = state
            .active
            .as_ref()
            .ok_or_else(|| SessionError::Driver(anyhow::anyhow!("no active window")))?;
        state
            .windows
            .iter()
            .find(|entry| entry.handle == *active)
            .map(|entry| entry.url.clone())
            .ok_or_else(|| SessionError::Driver(anyhow::anyhow!("active window is gone")))
    }
}
