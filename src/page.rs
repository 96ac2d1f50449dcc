//! Page-level pass-throughs: scrolling, highlighting, element geometry,
//! screenshots.

use std::path::Path;
use std::time::Duration;

use fantoccini::elements::Element;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::errors::Error;
use crate::session::{SessionError, WebDriverSession, classify};

/// Style applied by the highlight helpers.
const HIGHLIGHT_STYLE: &str = "background: yellow; border: 2px solid red;";

/// How long [`WebDriverSession::highlight`] keeps the style before
/// restoring the original.
const HIGHLIGHT_DURATION: Duration = Duration::from_secs(3);

impl WebDriverSession {
    /// Scroll the current window by a pixel offset. Negative `x` scrolls
    /// left, negative `y` scrolls up.
    pub async fn scroll_by(&self, x: i64, y: i64) -> Result<(), Error> {
        debug!("Scrolling window by ({}, {})", x, y);
        self.client
            .execute(
                "window.scrollBy(arguments[0], arguments[1]);",
                vec![json!(x), json!(y)],
            )
            .await
            .map_err(classify)?;
        Ok(())
    }

    /// Top-left position of `element` on the page, in pixels.
    pub async fn element_position(&self, element: &Element) -> Result<(f64, f64), Error> {
        let (x, y, _width, _height) = element.rectangle().await.map_err(classify)?;
        Ok((x, y))
    }

    /// Paint the highlight style onto `element` and leave it there.
    pub async fn highlight_permanently(&self, element: &Element) -> Result<(), Error> {
        self.set_style(element, HIGHLIGHT_STYLE).await
    }

    /// Highlight `element` for a few seconds, then restore its original
    /// inline style.
    pub async fn highlight(&self, element: &Element) -> Result<(), Error> {
        let original = element
            .attr("style")
            .await
            .map_err(classify)?
            .unwrap_or_default();

        self.set_style(element, HIGHLIGHT_STYLE).await?;
        sleep(HIGHLIGHT_DURATION).await;
        self.set_style(element, &original).await
    }

    /// Capture the current window as PNG and write it to `path`.
    pub async fn screenshot_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let png = self.client.screenshot().await.map_err(classify)?;
        tokio::fs::write(path.as_ref(), png)
            .await
            .map_err(|e| SessionError::Driver(e.into()))?;
        info!("Screenshot saved to {}", path.as_ref().display());
        Ok(())
    }

    async fn set_style(&self, element: &Element, style: &str) -> Result<(), Error> {
        let element_arg =
            serde_json::to_value(element).map_err(|e| SessionError::Driver(e.into()))?;
        self.client
            .execute(
                "arguments[0].setAttribute('style', arguments[1]);",
                vec![element_arg, json!(style)],
            )
            .await
            .map_err(classify)?;
        Ok(())
    }
}
