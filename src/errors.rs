use std::time::Duration;

use thiserror::Error;

use crate::session::SessionError;

/// Errors surfaced by the synchronization layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A wait expired before its condition was satisfied.
    ///
    /// Carries the condition description and how long the wait actually
    /// blocked; `elapsed` is never less than the configured timeout.
    #[error("timed out after {elapsed:?} waiting for {condition}")]
    WaitTimeout {
        /// Human-readable description of the condition that never held.
        condition: String,
        /// Time spent polling before giving up.
        elapsed: Duration,
    },

    /// A genuine driver fault (connection lost, invalid session, ...).
    ///
    /// Absence and staleness never take this path; probes fold those into
    /// `false`. Anything that does arrive here is passed through untranslated.
    #[error(transparent)]
    Session(#[from] SessionError),
}
