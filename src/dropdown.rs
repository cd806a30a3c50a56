//! Dropdown menu open/close state with keyboard handling.

#[cfg(test)]
#[path = "dropdown_test.rs"]
mod dropdown_test;

use crate::observe::{Observers, SubscriptionId};

/// Result of a key press the view should act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the browser's default action for the key.
    pub prevent_default: bool,
    /// Move focus as requested after the state change.
    pub focus: Option<FocusRequest>,
}

/// Focus move the view performs once the menu has rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusRequest {
    FirstMenuItem,
}

#[derive(Debug, Default)]
pub struct Dropdown {
    open: bool,
    listeners: Observers<(), bool>,
}

impl Dropdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Register a callback for every write to the open state.
    pub fn on_open_changed(&mut self, callback: impl FnMut(&bool) + 'static) -> SubscriptionId {
        self.listeners.subscribe((), callback)
    }

    /// Flip the menu. Opening asks the view to focus the first item.
    pub fn toggle(&mut self) -> Option<FocusRequest> {
        self.set_open(!self.open)
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// `Escape` closes; `Enter` and space toggle and suppress the default.
    pub fn handle_key(&mut self, key: &str) -> KeyOutcome {
        match key {
            "Escape" => {
                self.close();
                KeyOutcome::default()
            }
            "Enter" | " " => KeyOutcome { prevent_default: true, focus: self.toggle() },
            _ => KeyOutcome::default(),
        }
    }

    /// A click landed outside the menu.
    pub fn click_outside(&mut self) {
        if self.open {
            self.close();
        }
    }

    fn set_open(&mut self, open: bool) -> Option<FocusRequest> {
        self.open = open;
        self.listeners.notify(&[()], &open);
        open.then_some(FocusRequest::FirstMenuItem)
    }
}
