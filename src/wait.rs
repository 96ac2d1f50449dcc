use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::errors::Error;
use crate::probe::Probe;
use crate::session::Session;
use crate::types::Locator;

/// Timeout profile for element-level waits.
pub const ELEMENT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout profile for full-page-load waits.
pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// How often conditions are re-evaluated unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Floor for the poll interval; faster polling would hammer the session.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and polling cadence for a wait.
///
/// Two named profiles exist: [`WaitConfig::element`] (10 s) for
/// element-level waits and [`WaitConfig::page_load`] (60 s) for page loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    timeout: Duration,
    poll_interval: Duration,
}

impl WaitConfig {
    /// Config with the given timeout and the default poll interval.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// The short profile, for element-level waits.
    pub fn element() -> Self {
        Self::new(ELEMENT_WAIT_TIMEOUT)
    }

    /// The long profile, for full-page-load waits.
    pub fn page_load() -> Self {
        Self::new(PAGE_LOAD_TIMEOUT)
    }

    /// Override the poll interval, clamped to [`MIN_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Maximum time a wait may block.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delay between condition evaluations.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::element()
    }
}

/// Poll `condition` until it yields `true` or the timeout passes.
///
/// The condition is evaluated immediately, then re-evaluated every poll
/// interval. On expiry this fails with [`Error::WaitTimeout`] carrying
/// `description` and the elapsed duration; the error is only produced once
/// at least the configured timeout has elapsed, never earlier. A condition
/// error (a genuine driver fault) aborts the wait at once.
///
/// The loop suspends the calling task; there is no background polling.
/// Dropping the returned future simply abandons the wait.
pub async fn wait_until<F, Fut>(
    config: WaitConfig,
    description: &str,
    mut condition: F,
) -> Result<(), Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, Error>>,
{
    let start = Instant::now();
    debug!("Waiting up to {:?} for {}", config.timeout(), description);

    loop {
        if condition().await? {
            debug!("Condition {} held after {:?}", description, start.elapsed());
            return Ok(());
        }

        if start.elapsed() >= config.timeout() {
            let elapsed = start.elapsed();
            warn!("Gave up on {} after {:?}", description, elapsed);
            return Err(Error::WaitTimeout {
                condition: description.to_string(),
                elapsed,
            });
        }

        sleep(config.poll_interval()).await;
    }
}

/// Condition waits against a session.
///
/// Construction fixes the timeout profile; [`Wait::new`] uses the element
/// profile, [`Wait::with_config`] takes an explicit one. The wait only
/// reads through the session; it never clicks or writes.
///
/// ```no_run
/// use webwait::{Locator, Wait, WebDriverSession};
///
/// # async fn example(session: &WebDriverSession) -> Result<(), webwait::Error> {
/// Wait::new(session)
///     .until_visible(&Locator::css("button.submit"))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Wait<'s, S: Session> {
    session: &'s S,
    config: WaitConfig,
}

impl<'s, S: Session> Wait<'s, S> {
    /// Wait with the element profile (10 s).
    pub fn new(session: &'s S) -> Self {
        Self::with_config(session, WaitConfig::element())
    }

    /// Wait with an explicit config.
    pub fn with_config(session: &'s S, config: WaitConfig) -> Self {
        Self { session, config }
    }

    /// Poll an arbitrary condition under this wait's config.
    pub async fn until<F, Fut>(&self, description: &str, condition: F) -> Result<(), Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool, Error>>,
    {
        wait_until(self.config, description, condition).await
    }

    /// Block until `locator` matches at least one element.
    pub async fn until_present(&self, locator: &Locator) -> Result<(), Error> {
        let probe = Probe::new(self.session);
        self.until(&format!("element {} present", locator), || {
            probe.present(locator)
        })
        .await
    }

    /// Block until the first element matching `locator` is displayed.
    pub async fn until_visible(&self, locator: &Locator) -> Result<(), Error> {
        let probe = Probe::new(self.session);
        self.until(&format!("element {} visible", locator), || {
            probe.visible(locator)
        })
        .await
    }

    /// Block until a resolved element is displayed.
    pub async fn until_element_visible(&self, element: &S::Element) -> Result<(), Error> {
        let probe = Probe::new(self.session);
        self.until("resolved element visible", || {
            probe.element_visible(element)
        })
        .await
    }

    /// Block until no element matching `locator` is displayed: gone from
    /// the document or merely hidden.
    ///
    /// There is no element-handle variant: once the handle goes stale the
    /// driver cannot tell "disappeared" from "broken", so disappearance is
    /// only waitable by locator.
    pub async fn until_invisible(&self, locator: &Locator) -> Result<(), Error> {
        let probe = Probe::new(self.session);
        self.until(&format!("element {} invisible", locator), || {
            probe.invisible(locator)
        })
        .await
    }
}

/// Block until the page has loaded, 60 seconds tops.
///
/// Page load is modeled as the document root (`html`) becoming present.
pub async fn wait_for_page_load<S: Session>(session: &S) -> Result<(), Error> {
    wait_for_page_load_within(session, PAGE_LOAD_TIMEOUT).await
}

/// Block until the page has loaded, with an explicit timeout.
pub async fn wait_for_page_load_within<S: Session>(
    session: &S,
    timeout: Duration,
) -> Result<(), Error> {
    Wait::with_config(session, WaitConfig::new(timeout))
        .until_present(&Locator::tag("html"))
        .await
}

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;
