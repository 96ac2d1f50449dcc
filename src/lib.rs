//! # webwait
#![allow(clippy::uninlined_format_args)]
//!
//! Synchronization and target-resolution helpers for WebDriver-based UI
//! tests, built on [fantoccini].
//!
//! UI tests spend most of their logic deciding *when* the page is ready to
//! act on and *which* of several candidate targets to act on. This crate
//! owns exactly that layer:
//!
//! - [`Probe`] - one-shot presence / visibility / text / readonly checks
//! - [`Wait`] - condition polling with explicit timeout profiles
//! - [`first_resolvable`] - first-match-wins resolution over ordered
//!   locator candidates
//! - [`WindowSelector`] - switch the session to the window whose URL
//!   matches
//!
//! The driver is consumed through the [`Session`] trait; production code
//! attaches [`WebDriverSession`] to a connected fantoccini client, test
//! code can implement the trait over in-memory state.
//!
//! ## Usage
//!
//! ```no_run
//! use fantoccini::ClientBuilder;
//! use webwait::{Locator, Probe, Wait, WebDriverSession, WindowSelector, first_resolvable};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ClientBuilder::rustls().connect("http://localhost:4444").await?;
//! let session = WebDriverSession::new(client);
//!
//! // Wait for the checkout button to render
//! Wait::new(&session)
//!     .until_visible(&Locator::css("button.checkout"))
//!     .await?;
//!
//! // The login form moved around between releases; take whichever variant
//! // this deployment has
//! let login = first_resolvable(
//!     &session,
//!     &[
//!         Locator::css("form#login input[name='user']"),
//!         Locator::xpath("//form[@data-test='login']//input[1]"),
//!     ],
//! )
//! .await?;
//!
//! if let Some(locator) = login {
//!     let probe = Probe::new(&session);
//!     assert!(probe.visible(&locator).await?);
//! }
//!
//! // A click opened the payment provider in a new window
//! WindowSelector::new(&session)
//!     .switch_to_window_containing("payments.example")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Blocking model
//!
//! Everything is a plain sequential await on the calling task: a wait
//! blocks its caller until the condition holds or the timeout passes, and
//! nothing polls in the background. Timeouts are the only bound on
//! blocking; dropping a future abandons its operation.

/// Alert pass-throughs
mod alerts;

/// Crate error type
mod errors;

/// Pointer and keyboard pass-throughs
mod gestures;

/// Page-level pass-throughs (scroll, highlight, geometry, screenshots)
mod page;

/// Presence/visibility/text/readonly predicates
mod probe;

/// First-match candidate resolution
mod resolve;

/// The driver seam and its fantoccini implementation
mod session;

/// Locator value type
mod types;

/// Condition polling and timeout profiles
mod wait;

/// URL-based window selection
mod windows;

pub use errors::Error;
pub use probe::Probe;
pub use resolve::first_resolvable;
pub use session::{Session, SessionError, WebDriverSession};
pub use types::Locator;
pub use wait::{
    DEFAULT_POLL_INTERVAL, ELEMENT_WAIT_TIMEOUT, MIN_POLL_INTERVAL, PAGE_LOAD_TIMEOUT, Wait,
    WaitConfig, wait_for_page_load, wait_for_page_load_within, wait_until,
};
pub use windows::{DEFAULT_SETTLE_TIMEOUT, NoMatchPolicy, WindowSelector};
