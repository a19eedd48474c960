//! # Response Management
//!
//! Applies finished fetches to the mounted sessions and releases debounced
//! searches. The event loop calls `tick_at` on every turn.

use crate::catalog::controllers::ListSession;
use crate::catalog::events::ViewEvent;
use crate::catalog::view_models::core::ViewModel;
use std::time::Instant;

impl ViewModel {
    /// Advance timers and apply arrived responses; `true` if anything changed
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let searched = self.flush_due_search(now);

        let mut changed = false;
        if let Some(list) = self.list.as_mut() {
            changed |= list.poll_responses();
        }
        if let Some(detail) = self.detail.as_mut() {
            changed |= detail.poll_responses();
        }

        if changed {
            self.after_responses();
        }
        searched || changed
    }

    /// Wait until the mounted session has nothing in flight
    pub async fn settle(&mut self) {
        if let Some(list) = self.list.as_mut() {
            list.settle().await;
        }
        if let Some(detail) = self.detail.as_mut() {
            detail.settle().await;
        }
        self.after_responses();
    }

    fn after_responses(&mut self) {
        if let Some(notice) = self.list.as_mut().and_then(ListSession::take_notice) {
            self.set_status_message(notice.message());
        }

        let count = self.item_count();
        if self.selection >= count {
            self.selection = count.saturating_sub(1);
        }
        self.scroll_to_selection();

        if let Some(error) = self.list_state().and_then(|state| state.error()) {
            tracing::debug!("List shows error: {}", error);
        }
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }
}
