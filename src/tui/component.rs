//! Component contracts for the TUI
//!
//! The event loop routes keyboard input to whatever has focus; components
//! report whether they consumed the event so unhandled keys can bubble up
//! to the global handlers.

use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

/// Trait for components that handle keyboard input
///
/// Components own their navigation (selection movement, field cycling);
/// action keys that need app-level context (select a post, delete a
/// comment) bubble up as `Handled::No` and are dispatched by the event loop.
pub trait Interactive {
    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for the status bar when this component is focused
    fn focus_hint(&self) -> &'static str {
        ""
    }
}
