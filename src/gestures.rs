//! Pointer and keyboard pass-throughs.
//!
//! Thin conveniences over the W3C actions API; no decision logic lives
//! here. All of these operate on the concrete WebDriver session.

use fantoccini::actions::{
    InputSource, KeyAction, KeyActions, MOUSE_BUTTON_LEFT, MouseActions, PointerAction,
};
use fantoccini::elements::Element;
use fantoccini::key::Key;
use tracing::debug;

use crate::errors::Error;
use crate::session::{WebDriverSession, classify};

impl WebDriverSession {
    /// Move the pointer over `element` (mouse-over), without clicking.
    pub async fn hover(&self, element: &Element) -> Result<(), Error> {
        let actions = MouseActions::new("mouse".to_string()).then(PointerAction::MoveToElement {
            element: element.clone(),
            duration: None,
            x: 0,
            y: 0,
        });
        self.client.perform_actions(actions).await.map_err(classify)?;
        Ok(())
    }

    /// Drag `element` by a pixel offset and release it there.
    ///
    /// Negative `x_offset` drags left, negative `y_offset` drags up.
    pub async fn drag_and_drop_by(
        &self,
        element: &Element,
        x_offset: i64,
        y_offset: i64,
    ) -> Result<(), Error> {
        debug!("Dragging element by ({}, {})", x_offset, y_offset);
        let actions = MouseActions::new("mouse".to_string())
            .then(PointerAction::MoveToElement {
                element: element.clone(),
                duration: None,
                x: 0,
                y: 0,
            })
            .then(PointerAction::Down {
                button: MOUSE_BUTTON_LEFT,
            })
            .then(PointerAction::MoveBy {
                duration: None,
                x: x_offset,
                y: y_offset,
            })
            .then(PointerAction::Up {
                button: MOUSE_BUTTON_LEFT,
            });
        self.client.perform_actions(actions).await.map_err(classify)?;
        Ok(())
    }

    /// Clear an input by sending one backspace per character of its current
    /// value. Some masked inputs ignore the WebDriver `clear`; keystrokes
    /// get through.
    pub async fn backspace_clear(&self, element: &Element) -> Result<(), Error> {
        let value = element
            .attr("value")
            .await
            .map_err(classify)?
            .unwrap_or_default();
        let backspaces = char::from(Key::Backspace)
            .to_string()
            .repeat(value.chars().count());
        element.send_keys(&backspaces).await.map_err(classify)?;
        Ok(())
    }

    /// Zoom the current window one step in (Ctrl + '+').
    pub async fn zoom_in(&self) -> Result<(), Error> {
        self.zoom_chord(Key::Add).await
    }

    /// Zoom the current window one step out (Ctrl + '-').
    pub async fn zoom_out(&self) -> Result<(), Error> {
        self.zoom_chord(Key::Subtract).await
    }

    async fn zoom_chord(&self, key: Key) -> Result<(), Error> {
        let control = char::from(Key::Control);
        let key = char::from(key);
        let actions = KeyActions::new("keyboard".to_string())
            .then(KeyAction::Down { value: control })
            .then(KeyAction::Down { value: key })
            .then(KeyAction::Up { value: key })
            .then(KeyAction::Up { value: control });
        self.client.perform_actions(actions).await.map_err(classify)?;
        Ok(())
    }
}
