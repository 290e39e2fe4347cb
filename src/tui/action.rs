//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::controller::FormController;

/// An action that a screen handler returns to the [`App`](super::App).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event against the controller and return an [`Action`]
    /// for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent, controller: &mut FormController) -> Action;
}
