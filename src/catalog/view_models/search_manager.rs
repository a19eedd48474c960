//! # Search Management
//!
//! Edits to the search box. Typing only schedules a search; `tick_at`
//! issues it once the debounce period has passed, and Enter issues it
//! immediately.

use crate::catalog::controllers::ListIntent;
use crate::catalog::events::{Focus, ViewEvent};
use crate::catalog::view_models::core::ViewModel;
use std::time::Instant;

impl ViewModel {
    pub fn search_push(&mut self, ch: char, now: Instant) {
        self.search.push(ch, now);
        self.emit_view_event(ViewEvent::FilterBarUpdateRequired);
    }

    pub fn search_backspace(&mut self, now: Instant) {
        self.search.backspace(now);
        self.emit_view_event(ViewEvent::FilterBarUpdateRequired);
    }

    pub fn search_clear(&mut self, now: Instant) {
        self.search.clear(now);
        self.emit_view_event(ViewEvent::FilterBarUpdateRequired);
    }

    /// Search for the current text right away and return to browsing
    pub fn search_submit(&mut self) {
        let term = self.search.submit();
        self.dispatch_search(term);
        self.focus = Focus::Browse;
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    /// Issue the debounced search if it is due
    pub(super) fn flush_due_search(&mut self, now: Instant) -> bool {
        match self.search.take_due(now) {
            Some(term) => {
                self.dispatch_search(term);
                true
            }
            None => false,
        }
    }

    fn dispatch_search(&mut self, term: String) {
        let Some(list) = self.list.as_mut() else {
            return;
        };
        tracing::debug!("Searching for '{}'", term);

        let generation = list.state().generation();
        list.dispatch(ListIntent::Search(term));
        if list.state().generation() != generation {
            self.reset_selection();
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::events::{Focus, Route};
    use crate::catalog::services::{sample_product, sample_products, InMemoryCatalog};
    use crate::catalog::view_models::ViewModel;
    use crate::config::ApiProfile;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    async fn listing(catalog: Arc<InMemoryCatalog>) -> ViewModel {
        let mut vm = ViewModel::new(catalog, &ApiProfile::blank("test"));
        vm.navigate(Route::Listing);
        vm.settle().await;
        vm.set_focus(Focus::Search);
        vm
    }

    #[tokio::test]
    async fn typing_should_issue_one_search_after_debounce() {
        let catalog = Arc::new(InMemoryCatalog::new(vec![
            sample_product("1", "Chips", None, None),
            sample_product("2", "Cola", None, None),
        ]));
        let mut vm = listing(catalog.clone()).await;
        let start = Instant::now();

        for (i, ch) in "chi".chars().enumerate() {
            vm.search_push(ch, start + Duration::from_millis(100 * i as u64));
            vm.tick_at(start + Duration::from_millis(100 * i as u64));
        }
        assert!(catalog.search_calls().is_empty());

        vm.tick_at(start + Duration::from_millis(600));
        vm.settle().await;

        assert_eq!(catalog.search_calls(), vec!["chi".to_string()]);
        assert_eq!(vm.item_count(), 1);
    }

    #[tokio::test]
    async fn submit_should_search_immediately() {
        let catalog = Arc::new(InMemoryCatalog::new(sample_products(3)));
        let mut vm = listing(catalog.clone()).await;
        let now = Instant::now();

        vm.search_push('1', now);
        vm.search_submit();
        vm.tick_at(now + Duration::from_secs(1));
        vm.settle().await;

        assert_eq!(catalog.search_calls(), vec!["1".to_string()]);
        assert_eq!(vm.focus(), Focus::Browse);
    }

    #[tokio::test]
    async fn clearing_search_should_restore_listing() {
        let catalog = Arc::new(InMemoryCatalog::new(sample_products(3)));
        let mut vm = listing(catalog.clone()).await;
        let now = Instant::now();

        vm.search_push('2', now);
        vm.search_submit();
        vm.settle().await;
        assert_eq!(vm.item_count(), 1);

        vm.search_clear(now);
        vm.tick_at(now + Duration::from_secs(1));
        vm.settle().await;

        assert_eq!(vm.search_text(), "");
        assert_eq!(vm.item_count(), 3);
        assert_eq!(catalog.list_calls().len(), 2);
        assert_eq!(catalog.search_calls().len(), 1);
    }
}
