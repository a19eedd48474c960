//! # Listing Management
//!
//! Selection movement, infinite scroll, the category and sort pickers and
//! focus changes on the listing screen.

use crate::catalog::controllers::ListIntent;
use crate::catalog::events::{Focus, ViewEvent};
use crate::catalog::models::SortKey;
use crate::catalog::view_models::core::{ViewModel, LOAD_MORE_THRESHOLD};

/// First entry of the category picker, standing for "no filter"
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

impl ViewModel {
    /// Move the selection by `delta` cards, clamped to the list
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let target = self.selection.saturating_add_signed(delta).min(count - 1);
        self.select(target);
    }

    /// Select the last loaded product
    pub fn select_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.select(count - 1);
        }
    }

    pub fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selection {
            self.selection = index;
            self.scroll_to_selection();
            self.emit_view_event(ViewEvent::ListRedrawRequired);
        }
        self.load_more_if_near_end();
    }

    /// Request the next page when the selection approaches the end
    pub(super) fn load_more_if_near_end(&mut self) {
        let count = self.item_count();
        if count > 0 && count - 1 - self.selection.min(count - 1) < LOAD_MORE_THRESHOLD {
            self.load_more();
        }
    }

    /// Request the next page; the list controller ignores it when it does not apply
    pub fn load_more(&mut self) {
        if let Some(list) = self.list.as_mut() {
            list.dispatch(ListIntent::LoadMore);
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
    }

    /// Refetch the current query from the first page
    pub fn refresh(&mut self) {
        if let Some(list) = self.list.as_mut() {
            list.dispatch(ListIntent::Refresh);
            self.reset_selection();
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        self.picker_cursor = match focus {
            Focus::CategoryPicker => self.current_category_index(),
            Focus::SortPicker => self.current_sort_index(),
            _ => 0,
        };
        self.focus = focus;
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    /// Entries of the open picker, in display order
    pub fn picker_options(&self) -> Vec<String> {
        match self.focus {
            Focus::CategoryPicker => std::iter::once(ALL_CATEGORIES_LABEL.to_string())
                .chain(
                    self.list_state()
                        .map(|state| state.categories().to_vec())
                        .unwrap_or_default(),
                )
                .collect(),
            Focus::SortPicker => SortKey::ALL
                .iter()
                .map(|key| key.label().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn picker_move(&mut self, delta: isize) {
        let count = self.picker_options().len();
        if count == 0 {
            return;
        }
        self.picker_cursor = self.picker_cursor.saturating_add_signed(delta).min(count - 1);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    /// Apply the highlighted picker entry and return to browsing
    pub fn picker_confirm(&mut self) {
        let intent = match self.focus {
            Focus::CategoryPicker => {
                let category = match self.picker_cursor {
                    0 => None,
                    n => self
                        .list_state()
                        .and_then(|state| state.categories().get(n - 1).cloned()),
                };
                ListIntent::ChangeCategory(category)
            }
            Focus::SortPicker => {
                let sort = SortKey::ALL
                    .get(self.picker_cursor)
                    .copied()
                    .unwrap_or_default();
                ListIntent::ChangeSort(sort)
            }
            _ => return,
        };

        self.focus = Focus::Browse;
        if let Some(list) = self.list.as_mut() {
            let generation = list.state().generation();
            list.dispatch(intent);
            if list.state().generation() != generation {
                // A new query supersedes the search box contents
                self.search.reset();
                self.reset_selection();
            }
        }
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    fn current_category_index(&self) -> usize {
        self.list_state()
            .and_then(|state| {
                let current = state.query().category.as_ref()?;
                state.categories().iter().position(|c| c == current)
            })
            .map_or(0, |index| index + 1)
    }

    fn current_sort_index(&self) -> usize {
        let sort = self
            .list_state()
            .map(|state| state.query().sort)
            .unwrap_or_default();
        SortKey::ALL.iter().position(|key| *key == sort).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::events::Route;
    use crate::catalog::services::{sample_product, sample_products, InMemoryCatalog};
    use crate::config::ApiProfile;
    use std::sync::Arc;

    async fn listing(catalog: InMemoryCatalog) -> (ViewModel, Arc<InMemoryCatalog>) {
        let catalog = Arc::new(catalog);
        let mut vm = ViewModel::new(catalog.clone(), &ApiProfile::blank("test"));
        vm.navigate(Route::Listing);
        vm.settle().await;
        (vm, catalog)
    }

    #[tokio::test]
    async fn move_selection_should_clamp_to_list() {
        let (mut vm, _) = listing(InMemoryCatalog::new(sample_products(5))).await;

        vm.move_selection(-1);
        assert_eq!(vm.selection(), 0);
        vm.move_selection(100);
        assert_eq!(vm.selection(), 4);
    }

    #[tokio::test]
    async fn selection_near_end_should_request_next_page() {
        let (mut vm, catalog) = listing(InMemoryCatalog::new(sample_products(25))).await;
        assert_eq!(vm.item_count(), 20);

        vm.move_selection(17);
        vm.settle().await;

        assert_eq!(catalog.list_calls().len(), 2);
        assert_eq!(vm.item_count(), 25);
    }

    #[tokio::test]
    async fn selection_far_from_end_should_not_load_more() {
        let (mut vm, catalog) = listing(InMemoryCatalog::new(sample_products(25))).await;

        vm.move_selection(5);
        vm.settle().await;

        assert_eq!(catalog.list_calls().len(), 1);
    }

    #[tokio::test]
    async fn category_picker_should_start_with_all_categories() {
        let catalog = InMemoryCatalog::new(sample_products(2)).with_categories(["drinks", "snacks"]);
        let (mut vm, _) = listing(catalog).await;

        vm.set_focus(Focus::CategoryPicker);

        assert_eq!(vm.picker_options(), vec!["All Categories", "drinks", "snacks"]);
        assert_eq!(vm.picker_cursor(), 0);
    }

    #[tokio::test]
    async fn picker_confirm_should_change_category() {
        let catalog = InMemoryCatalog::new(vec![
            sample_product("1", "Cola", Some("drinks"), None),
            sample_product("2", "Chips", Some("snacks"), None),
        ])
        .with_categories(["drinks", "snacks"]);
        let (mut vm, catalog) = listing(catalog).await;

        vm.set_focus(Focus::CategoryPicker);
        vm.picker_move(2);
        vm.picker_confirm();
        vm.settle().await;

        assert_eq!(vm.focus(), Focus::Browse);
        let last = catalog.list_calls().pop().and_then(|r| r.category);
        assert_eq!(last.as_deref(), Some("snacks"));
        assert_eq!(vm.item_count(), 1);

        // Reopening highlights the active category
        vm.set_focus(Focus::CategoryPicker);
        assert_eq!(vm.picker_cursor(), 2);
    }

    #[tokio::test]
    async fn sort_picker_confirm_should_change_sort() {
        let (mut vm, catalog) = listing(InMemoryCatalog::new(sample_products(3))).await;

        vm.set_focus(Focus::SortPicker);
        vm.picker_move(1);
        vm.picker_confirm();
        vm.settle().await;

        let last = catalog.list_calls().pop().map(|r| r.sort);
        assert_eq!(last, Some(SortKey::NameAsc));
    }

    #[tokio::test]
    async fn confirming_current_value_should_not_refetch() {
        let (mut vm, catalog) = listing(InMemoryCatalog::new(sample_products(3))).await;

        vm.set_focus(Focus::SortPicker);
        vm.picker_confirm();
        vm.settle().await;

        assert_eq!(catalog.list_calls().len(), 1);
    }
}
