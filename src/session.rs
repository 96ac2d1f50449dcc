use async_trait::async_trait;
use fantoccini::Client;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::WindowHandle;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::types::Locator;

/// Faults reported by the driver collaborator.
///
/// `NoSuchElement` and `StaleReference` are *expected* outcomes: the probe
/// layer folds them into `false` and they never reach callers. `Driver`
/// wraps everything else and always propagates.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Lookup matched nothing.
    #[error("no such element")]
    NoSuchElement,

    /// A previously resolved element is no longer attached to the document.
    #[error("stale element reference")]
    StaleReference,

    /// Any other driver-level fault, passed through untranslated.
    #[error(transparent)]
    Driver(#[from] anyhow::Error),
}

/// The browser-automation driver this layer reads from and switches.
///
/// The session is owned and managed externally; this crate only consumes
/// the operations below and redirects the active window. Element and window
/// handles stay in the driver's own types via the associated types, so a
/// test suite can implement the trait over plain in-memory state.
#[async_trait]
pub trait Session: Send + Sync {
    /// Driver-native resolved-element handle.
    type Element: Clone + Send + Sync;
    /// Driver-native window/tab handle.
    type Window: Clone + PartialEq + Send + Sync;

    /// All elements currently matching `locator`, possibly empty.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, SessionError>;

    /// Tag name of a resolved element. Fails with `StaleReference` when the
    /// handle no longer resolves; this is the cheapest liveness read.
    async fn tag_name(&self, element: &Self::Element) -> Result<String, SessionError>;

    /// The driver's native visibility computation (layout + CSS).
    async fn is_displayed(&self, element: &Self::Element) -> Result<bool, SessionError>;

    /// Rendered text of the element.
    async fn text(&self, element: &Self::Element) -> Result<String, SessionError>;

    /// Named attribute value, `None` when the attribute is absent.
    async fn attr(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, SessionError>;

    /// All open window/tab handles. Unordered; the set may grow or shrink
    /// between calls as windows open and close externally.
    async fn windows(&self) -> Result<Vec<Self::Window>, SessionError>;

    /// The handle the session is currently directed at.
    async fn active_window(&self) -> Result<Self::Window, SessionError>;

    /// Redirect the session to `window`.
    async fn switch_to_window(&self, window: &Self::Window) -> Result<(), SessionError>;

    /// URL of the active window.
    async fn current_url(&self) -> Result<Url, SessionError>;
}

/// `Session` backed by a connected fantoccini [`Client`].
///
/// The client is created and torn down by the caller; attaching here does
/// not take over its lifecycle.
///
/// ```no_run
/// use fantoccini::ClientBuilder;
/// use webwait::WebDriverSession;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ClientBuilder::rustls().connect("http://localhost:4444").await?;
/// let session = WebDriverSession::new(client);
/// # Ok(())
/// # }
/// ```
pub struct WebDriverSession {
    pub(crate) client: Client,
}

impl WebDriverSession {
    /// Attach to an already-connected WebDriver client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying fantoccini client, for operations this crate does not
    /// wrap.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Detach, returning the client.
    pub fn into_client(self) -> Client {
        self.client
    }
}

#[async_trait]
impl Session for WebDriverSession {
    type Element = Element;
    type Window = WindowHandle;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, SessionError> {
        debug!("Finding elements with {}", locator);
        self.client
            .find_all(to_driver_locator(locator))
            .await
            .map_err(classify)
    }

    async fn tag_name(&self, element: &Element) -> Result<String, SessionError> {
        element.tag_name().await.map_err(classify)
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool, SessionError> {
        element.is_displayed().await.map_err(classify)
    }

    async fn text(&self, element: &Element) -> Result<String, SessionError> {
        element.text().await.map_err(classify)
    }

    async fn attr(&self, element: &Element, name: &str) -> Result<Option<String>, SessionError> {
        element.attr(name).await.map_err(classify)
    }

    async fn windows(&self) -> Result<Vec<WindowHandle>, SessionError> {
        self.client.windows().await.map_err(classify)
    }

    async fn active_window(&self) -> Result<WindowHandle, SessionError> {
        self.client.window().await.map_err(classify)
    }

    async fn switch_to_window(&self, window: &WindowHandle) -> Result<(), SessionError> {
        self.client
            .switch_to_window(window.clone())
            .await
            .map_err(classify)
    }

    async fn current_url(&self) -> Result<Url, SessionError> {
        self.client.current_url().await.map_err(classify)
    }
}

/// Map this crate's locator onto fantoccini's.
///
/// fantoccini has no tag-name strategy; a bare tag name is a valid CSS type
/// selector, so `Tag` rides on `Css`.
pub(crate) fn to_driver_locator(locator: &Locator) -> fantoccini::Locator<'_> {
    match locator {
        Locator::Css(s) => fantoccini::Locator::Css(s),
        Locator::XPath(s) => fantoccini::Locator::XPath(s),
        Locator::Id(s) => fantoccini::Locator::Id(s),
        Locator::LinkText(s) => fantoccini::Locator::LinkText(s),
        Locator::Tag(s) => fantoccini::Locator::Css(s),
    }
}

/// Sort a fantoccini error into the session taxonomy.
///
/// Stale references are only identifiable from the WebDriver error string,
/// so that case is matched on the message.
pub(crate) fn classify(err: CmdError) -> SessionError {
    if matches!(err, CmdError::NoSuchElement(_)) {
        return SessionError::NoSuchElement;
    }
    let message = err.to_string();
    if message.contains("stale element reference") {
        return SessionError::StaleReference;
    }
    SessionError::Driver(err.into())
}
