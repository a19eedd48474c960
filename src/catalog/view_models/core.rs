//! # Core ViewModel Structure
//!
//! Contains the main ViewModel struct and basic initialization logic.
//! The ViewModel owns the controller sessions for whichever screen is
//! showing and the UI state around them (focus, selection, search text).

use crate::catalog::controllers::{DetailModel, DetailSession, ListSession, ListState};
use crate::catalog::events::{Focus, Route, ViewEvent};
use crate::catalog::models::StatusLine;
use crate::catalog::services::CatalogApi;
use crate::catalog::view_models::search_input::SearchInput;
use crate::config::ApiProfile;
use std::sync::Arc;

/// Rows used by one product card, including its trailing blank line
pub const CARD_HEIGHT: usize = 4;

/// Rows around the cards: header, filter bar, separator, list footer and status bar
pub const CHROME_HEIGHT: usize = 5;

/// Start loading the next page once the selection is this close to the end
pub const LOAD_MORE_THRESHOLD: usize = 3;

pub struct ViewModel {
    pub(super) api: Arc<dyn CatalogApi>,
    pub(super) route: Route,

    // Present only while their screen is showing
    pub(super) list: Option<ListSession>,
    pub(super) detail: Option<DetailSession>,

    pub(super) focus: Focus,
    pub(super) selection: usize,
    /// Index of the first card drawn
    pub(super) scroll_offset: usize,
    pub(super) search: SearchInput,
    pub(super) picker_cursor: usize,

    pub(super) status_line: StatusLine,
    pub(super) terminal_size: (u16, u16),
    pub(super) pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    pub fn new(api: Arc<dyn CatalogApi>, profile: &ApiProfile) -> Self {
        let mut status_line = StatusLine::new();
        status_line.set_profile_info(profile.name.clone(), profile.base_url.clone());

        Self {
            api,
            route: Route::Landing,
            list: None,
            detail: None,
            focus: Focus::Browse,
            selection: 0,
            scroll_offset: 0,
            search: SearchInput::new(profile.search_debounce),
            picker_cursor: 0,
            status_line,
            terminal_size: (80, 24),
            pending_view_events: Vec::new(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn search_text(&self) -> &str {
        self.search.text()
    }

    pub fn picker_cursor(&self) -> usize {
        self.picker_cursor
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// List state while the listing screen is mounted
    pub fn list_state(&self) -> Option<&ListState> {
        self.list.as_ref().map(ListSession::state)
    }

    /// Detail model while a detail screen is mounted
    pub fn detail_model(&self) -> Option<&DetailModel> {
        self.detail.as_ref().map(DetailSession::model)
    }

    /// Number of products currently listed
    pub fn item_count(&self) -> usize {
        self.list_state().map_or(0, |state| state.items().len())
    }

    /// How many product cards fit above the list footer
    ///
    /// The renderer draws exactly this many, so the selection is always on screen.
    pub fn visible_card_count(&self) -> usize {
        let rows = (self.terminal_size.1 as usize).saturating_sub(CHROME_HEIGHT);
        (rows / CARD_HEIGHT).max(1)
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.scroll_to_selection();
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_line.set_status_message(message);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        self.pending_view_events.push(event);
        tracing::trace!("View event emitted: {:?}", self.pending_view_events.last());
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    /// Keep the selected card inside the visible window
    pub(super) fn scroll_to_selection(&mut self) {
        let visible = self.visible_card_count();
        if self.selection < self.scroll_offset {
            self.scroll_offset = self.selection;
        } else if self.selection >= self.scroll_offset + visible {
            self.scroll_offset = self.selection + 1 - visible;
        }
    }

    /// Back to the top of a new result set; old notices no longer apply
    pub(super) fn reset_selection(&mut self) {
        self.selection = 0;
        self.scroll_offset = 0;
        self.status_line.clear_status_message();
    }
}
