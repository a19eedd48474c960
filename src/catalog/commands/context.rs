//! # Command Context
//!
//! Read-only view of the ViewModel handed to commands for relevance checks.

use crate::catalog::events::{Focus, Route};
use crate::catalog::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelSnapshot {
    pub route: Route,
    pub focus: Focus,
    pub item_count: usize,
    pub selection: usize,
    pub visible_cards: usize,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            route: view_model.route().clone(),
            focus: view_model.focus(),
            item_count: view_model.item_count(),
            selection: view_model.selection(),
            visible_cards: view_model.visible_card_count(),
        }
    }

    /// Listing screen with the product cards focused
    pub fn is_browsing(&self) -> bool {
        self.route.is_listing() && self.focus == Focus::Browse
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }
}

#[cfg(test)]
pub(crate) fn test_context(route: Route, focus: Focus) -> CommandContext {
    CommandContext::new(ViewModelSnapshot {
        route,
        focus,
        item_count: 30,
        selection: 0,
        visible_cards: 5,
    })
}
