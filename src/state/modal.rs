//! Modal overlays for the list views.

/// Active modal dialog, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// No modal visible.
    None,
    /// Keybinding help overlay.
    Help,
    /// Blocking message with a single dismiss action.
    Alert {
        /// Message text shown to the user.
        message: String,
    },
    /// Filter menu editing the pending status / fund-ID selection.
    Filters {
        /// Highlighted row within the menu.
        cursor: usize,
    },
    /// Sort field menu.
    Sort {
        /// Highlighted row within the menu.
        cursor: usize,
    },
}

impl Modal {
    /// Whether any modal is currently open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}
