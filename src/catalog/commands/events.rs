//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::catalog::events::{Focus, Route};

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Request application quit
    QuitRequested,

    /// Request a route change
    NavigateRequested { route: Route },

    /// Open the detail screen for the selected product
    OpenSelectedRequested,

    /// Go up one screen
    BackRequested,

    /// Move the selection by a number of cards
    SelectionMoveRequested { delta: isize },

    /// Jump to the first or last loaded card
    SelectionJumpRequested { to_end: bool },

    /// Load the next page explicitly
    LoadMoreRequested,

    /// Refetch the list from the first page
    RefreshRequested,

    /// Move keyboard focus
    FocusRequested { focus: Focus },

    /// Search box editing
    SearchCharRequested { ch: char },
    SearchBackspaceRequested,
    SearchClearRequested,
    SearchSubmitRequested,

    /// Move the highlighted picker entry
    PickerMoveRequested { delta: isize },

    /// Apply the highlighted picker entry
    PickerConfirmRequested,

    /// No action needed (for commands that don't produce events)
    NoAction,
}

impl CommandEvent {
    pub fn navigate(route: Route) -> Self {
        Self::NavigateRequested { route }
    }

    pub fn focus(focus: Focus) -> Self {
        Self::FocusRequested { focus }
    }
}
