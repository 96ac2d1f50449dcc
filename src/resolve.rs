use tracing::{debug, info};

use crate::errors::Error;
use crate::probe::Probe;
use crate::session::Session;
use crate::types::Locator;

/// First candidate locator that currently resolves, in the given order.
///
/// Each candidate is checked for presence exactly once, with no retry; the
/// first one matching at least one element wins. `None` means no candidate
/// resolved, a normal outcome the caller must handle rather than an error. Wrap
/// the call in [`crate::wait_until`] if the candidates need time to appear.
///
/// The session is only read; nothing is clicked, switched, or written.
pub async fn first_resolvable<S: Session>(
    session: &S,
    candidates: &[Locator],
) -> Result<Option<Locator>, Error> {
    let probe = Probe::new(session);

    for candidate in candidates {
        if probe.present(candidate).await? {
            info!("Resolved candidate {}", candidate);
            return Ok(Some(candidate.clone()));
        }
        debug!("Candidate {} did not resolve, trying next", candidate);
    }

    debug!("No candidate resolved out of {}", candidates.len());
    Ok(None)
}
