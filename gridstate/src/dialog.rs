//! Dialog visibility state.

use crate::state::State;

/// Visibility cell for a modal or dialog.
///
/// Nothing more than an open/closed flag with the crate's usual dirty
/// tracking; the host framework decides what "open" renders as.
#[derive(Debug, Clone, Default)]
pub struct Dialog {
    visible: State<bool>,
}

impl Dialog {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog.
    pub fn show(&self) {
        self.visible.set(true);
    }

    /// Close the dialog.
    pub fn hide(&self) {
        self.visible.set(false);
    }

    /// Flip the dialog's visibility.
    pub fn toggle(&self) {
        self.visible.update(|v| *v = !*v);
    }

    /// Check if the dialog is open.
    pub fn is_open(&self) -> bool {
        self.visible.get()
    }

    /// Check if the visibility changed since last check.
    pub fn is_dirty(&self) -> bool {
        self.visible.is_dirty()
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.visible.clear_dirty();
    }
}
