//! # Navigation Management
//!
//! Route changes. Entering a screen mounts its controller session and
//! leaving it unmounts the session, which drops any response still in flight.

use crate::catalog::controllers::{DetailSession, ListIntent, ListSession};
use crate::catalog::events::{Focus, Route, ViewEvent};
use crate::catalog::view_models::core::ViewModel;
use std::sync::Arc;

impl ViewModel {
    /// Switch to `route`. Must be called inside a tokio runtime.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::info!("Navigating from {:?} to {:?}", self.route, route);

        self.leave_current_route();
        self.route = route;

        match self.route.clone() {
            Route::Landing => {}
            Route::Listing => {
                let mut session = ListSession::new(Arc::clone(&self.api));
                session.dispatch(ListIntent::Mount);
                self.list = Some(session);
                self.focus = Focus::Browse;
                self.search.reset();
                self.reset_selection();
            }
            Route::Detail(id) => {
                let mut session = DetailSession::new(Arc::clone(&self.api));
                session.mount(&id);
                self.detail = Some(session);
            }
        }

        self.status_line.clear_status_message();
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    /// Open the detail screen for the selected product
    pub fn open_selected(&mut self) {
        if !self.route.is_listing() {
            return;
        }
        let id = self
            .list_state()
            .and_then(|state| state.items().get(self.selection))
            .map(|product| product.id.clone());

        match id {
            Some(id) => self.navigate(Route::Detail(id)),
            None => tracing::debug!("Nothing selected to open"),
        }
    }

    /// One level up: detail to listing, listing to landing
    pub fn go_back(&mut self) {
        match self.route {
            Route::Detail(_) => self.navigate(Route::Listing),
            Route::Listing => self.navigate(Route::Landing),
            Route::Landing => {}
        }
    }

    fn leave_current_route(&mut self) {
        if let Some(mut session) = self.list.take() {
            session.dispatch(ListIntent::Unmount);
        }
        if let Some(mut session) = self.detail.take() {
            session.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::controllers::DetailState;
    use crate::catalog::events::Route;
    use crate::catalog::services::{sample_products, InMemoryCatalog};
    use crate::catalog::view_models::ViewModel;
    use crate::config::ApiProfile;
    use std::sync::Arc;

    fn view_model(catalog: InMemoryCatalog) -> ViewModel {
        ViewModel::new(Arc::new(catalog), &ApiProfile::blank("test"))
    }

    #[tokio::test]
    async fn navigate_to_listing_should_mount_list_session() {
        let mut vm = view_model(InMemoryCatalog::new(sample_products(3)));

        vm.navigate(Route::Listing);

        let state = vm.list_state().map(|s| (s.is_mounted(), s.is_loading()));
        assert_eq!(state, Some((true, true)));
        assert!(vm.detail_model().is_none());
    }

    #[tokio::test]
    async fn navigate_to_detail_should_drop_list_session() {
        let mut vm = view_model(InMemoryCatalog::new(sample_products(3)));
        vm.navigate(Route::Listing);

        vm.navigate(Route::Detail("2".to_string()));

        assert!(vm.list_state().is_none());
        let model = vm.detail_model().map(|m| m.state().clone());
        assert_eq!(model, Some(DetailState::Loading));
    }

    #[tokio::test]
    async fn go_back_should_walk_up_the_routes() {
        let mut vm = view_model(InMemoryCatalog::new(sample_products(1)));
        vm.navigate(Route::Detail("1".to_string()));

        vm.go_back();
        assert_eq!(vm.route(), &Route::Listing);
        vm.go_back();
        assert_eq!(vm.route(), &Route::Landing);
        vm.go_back();
        assert_eq!(vm.route(), &Route::Landing);
    }

    #[tokio::test]
    async fn open_selected_without_items_should_stay_on_listing() {
        let mut vm = view_model(InMemoryCatalog::new(Vec::new()));
        vm.navigate(Route::Listing);

        vm.open_selected();

        assert_eq!(vm.route(), &Route::Listing);
    }

    #[tokio::test]
    async fn navigate_to_same_route_should_not_remount() {
        let mut vm = view_model(InMemoryCatalog::new(sample_products(1)));
        vm.navigate(Route::Listing);
        let generation = vm.list_state().map(|s| s.generation());
        vm.collect_pending_view_events();

        vm.navigate(Route::Listing);

        assert_eq!(vm.list_state().map(|s| s.generation()), generation);
        assert!(vm.collect_pending_view_events().is_empty());
    }
}
