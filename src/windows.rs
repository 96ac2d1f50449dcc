use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::errors::Error;
use crate::session::Session;
use crate::wait::{MIN_POLL_INTERVAL, WaitConfig};

/// Upper bound on the settle poll before window enumeration.
pub const DEFAULT_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Which handle stays active when no window URL matches.
///
/// The original behavior, kept as the default here, is to leave the session
/// on the last handle the iteration visited. That is surprising but
/// long-standing, so it is a policy choice rather than a silent fix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchPolicy {
    /// Leave the active window wherever iteration stopped.
    #[default]
    StayOnLast,
    /// Switch back to the handle that was active before the search. Only
    /// possible in the multi-window branch, where that handle is recorded.
    RestoreOrigin,
}

/// Switches the session's active window to the one whose URL matches.
///
/// ```no_run
/// use webwait::{WebDriverSession, WindowSelector};
///
/// # async fn example(session: &WebDriverSession) -> Result<(), webwait::Error> {
/// WindowSelector::new(session)
///     .switch_to_window_containing("/checkout")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct WindowSelector<'s, S: Session> {
    session: &'s S,
    settle: WaitConfig,
    no_match: NoMatchPolicy,
}

impl<'s, S: Session> WindowSelector<'s, S> {
    /// Selector with the default settle bound and no-match policy.
    pub fn new(session: &'s S) -> Self {
        Self {
            session,
            settle: WaitConfig::new(DEFAULT_SETTLE_TIMEOUT)
                .with_poll_interval(MIN_POLL_INTERVAL),
            no_match: NoMatchPolicy::default(),
        }
    }

    /// Override the settle poll bound. `Duration::ZERO` disables the settle
    /// entirely.
    pub fn with_settle(mut self, settle: WaitConfig) -> Self {
        self.settle = settle;
        self
    }

    /// Override what happens when no window matches.
    pub fn with_no_match_policy(mut self, policy: NoMatchPolicy) -> Self {
        self.no_match = policy;
        self
    }

    /// Switch the session to the first open window whose URL contains
    /// `url_fragment`.
    ///
    /// When more than one window is open, the handle active at entry is
    /// recorded and skipped, so the search lands on *another* window with a
    /// matching URL rather than trivially re-matching the current one. With
    /// a single window open, any match is accepted.
    ///
    /// If nothing matches, the active window is decided by the configured
    /// [`NoMatchPolicy`]. With zero windows open this is a no-op and the
    /// active window is left untouched.
    pub async fn switch_to_window_containing(&self, url_fragment: &str) -> Result<(), Error> {
        self.settle().await?;

        let handles = self.session.windows().await?;
        debug!(
            "Searching {} window(s) for URL containing {:?}",
            handles.len(),
            url_fragment
        );

        // Record the origin only when there is something to come back from;
        // with a single window, matching the current one is fine.
        let origin = if handles.len() > 1 {
            Some(self.session.active_window().await?)
        } else {
            None
        };

        for handle in &handles {
            self.session.switch_to_window(handle).await?;
            let url = self.session.current_url().await?;

            if !url.as_str().contains(url_fragment) {
                continue;
            }
            if let Some(origin) = &origin
                && handle == origin
            {
                debug!("Skipping origin window at {}", url);
                continue;
            }

            info!("Switched to window at {}", url);
            return Ok(());
        }

        warn!("No window URL contains {:?}", url_fragment);
        if self.no_match == NoMatchPolicy::RestoreOrigin
            && let Some(origin) = &origin
        {
            self.session.switch_to_window(origin).await?;
        }
        Ok(())
    }

    /// Bounded poll for a just-opened window to register its handle.
    ///
    /// Re-enumerates until the handle count changes or the bound elapses:
    /// a freshly opened window usually shows up well before the bound, a
    /// steady set costs the full bound and no more. Cancellation (dropping
    /// the future) is a no-op: no window state has been touched yet.
    async fn settle(&self) -> Result<(), Error> {
        if self.settle.timeout().is_zero() {
            return Ok(());
        }

        let baseline = self.session.windows().await?.len();
        let start = Instant::now();

        while start.elapsed() < self.settle.timeout() {
            sleep(self.settle.poll_interval()).await;
            let count = self.session.windows().await?.len();
            if count != baseline {
                debug!("Window count changed {} -> {}", baseline, count);
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "windows_test.rs"]
mod windows_test;
