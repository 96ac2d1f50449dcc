//! Alert pass-throughs.
//!
//! Presence is folded to a boolean the same way the probe layer treats
//! missing elements; the accept/dismiss/text operations propagate driver
//! faults untouched.

use fantoccini::error::CmdError;
use tracing::debug;

use crate::errors::Error;
use crate::session::{WebDriverSession, classify};

impl WebDriverSession {
    /// Is a JavaScript alert (or confirm/prompt) currently open?
    pub async fn alert_present(&self) -> Result<bool, Error> {
        match self.client.get_alert_text().await {
            Ok(_) => Ok(true),
            Err(e) if is_no_alert(&e) => Ok(false),
            Err(e) => Err(classify(e).into()),
        }
    }

    /// Text of the open alert.
    pub async fn alert_text(&self) -> Result<String, Error> {
        Ok(self.client.get_alert_text().await.map_err(classify)?)
    }

    /// Accept the open alert.
    pub async fn accept_alert(&self) -> Result<(), Error> {
        debug!("Accepting alert");
        Ok(self.client.accept_alert().await.map_err(classify)?)
    }

    /// Dismiss the open alert.
    pub async fn dismiss_alert(&self) -> Result<(), Error> {
        debug!("Dismissing alert");
        Ok(self.client.dismiss_alert().await.map_err(classify)?)
    }
}

fn is_no_alert(err: &CmdError) -> bool {
    err.to_string().contains("no such alert")
}
