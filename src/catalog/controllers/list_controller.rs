//! # Product List Controller
//!
//! Pure state machine behind the product list. `reduce` takes the current
//! state and one action (a user intent or an API response) and returns the
//! next state plus the effects the caller must run. No I/O happens here.
//!
//! Every fetch is tagged with the request generation it was issued under.
//! Intents that replace the collection bump the generation, so a response
//! that arrives after a newer request was issued no longer matches and is
//! dropped instead of overwriting newer state.

use crate::catalog::models::{
    normalize_category, CollectionState, ListQuery, Product, SortKey,
};
use crate::catalog::services::{ApiError, PageRequest};

/// Monotonic request tag
pub type Generation = u64;

/// Message shown when a page fetch fails
pub const LIST_ERROR_MESSAGE: &str = "Failed to fetch products. Try again later.";

/// Message shown when a search fails
pub const SEARCH_ERROR_MESSAGE: &str = "Error searching products. Please try again later.";

/// How a fetched page is merged into the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

/// User intents
#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent {
    /// List view appeared: fetch categories and the first page
    Mount,
    ChangeCategory(Option<String>),
    ChangeSort(SortKey),
    Search(String),
    LoadMore,
    /// Fetch the first page of the current query again
    Refresh,
    /// List view went away: ignore everything still in flight
    Unmount,
}

/// Completed API calls fed back into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse {
    Page {
        generation: Generation,
        mode: FetchMode,
        request: PageRequest,
        result: Result<Vec<Product>, ApiError>,
    },
    Search {
        generation: Generation,
        term: String,
        result: Result<Vec<Product>, ApiError>,
    },
    Categories {
        /// Mount the fetch was issued under
        mount: Generation,
        result: Result<Vec<String>, ApiError>,
    },
}

/// Input to `reduce`
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction {
    Intent(ListIntent),
    Response(ListResponse),
}

impl From<ListIntent> for ListAction {
    fn from(intent: ListIntent) -> Self {
        Self::Intent(intent)
    }
}

impl From<ListResponse> for ListAction {
    fn from(response: ListResponse) -> Self {
        Self::Response(response)
    }
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum ListEffect {
    FetchPage {
        generation: Generation,
        mode: FetchMode,
        request: PageRequest,
    },
    Search {
        generation: Generation,
        term: String,
    },
    FetchCategories { mount: Generation },
    /// Abort whatever is still in flight
    CancelInFlight,
}

/// Something the status bar should tell the user once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNotice {
    LoadedMore(usize),
    EndOfList,
    CategoriesUnavailable,
}

impl ListNotice {
    pub fn message(&self) -> String {
        match self {
            Self::LoadedMore(count) => format!("Loaded {count} more products"),
            Self::EndOfList => "End of list".to_string(),
            Self::CategoriesUnavailable => "Categories unavailable".to_string(),
        }
    }
}

/// Complete state of the list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    query: ListQuery,
    collection: CollectionState,
    categories: Vec<String>,
    generation: Generation,
    /// Bumped on every mount; tags the category fetch
    mount: Generation,
    mounted: bool,
    notice: Option<ListNotice>,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            query: ListQuery::new(),
            collection: CollectionState::new(),
            categories: Vec::new(),
            generation: 0,
            mount: 0,
            mounted: false,
            notice: None,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn collection(&self) -> &CollectionState {
        &self.collection
    }

    pub fn items(&self) -> &[Product] {
        &self.collection.items
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading
    }

    pub fn has_more(&self) -> bool {
        self.collection.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.collection.error.as_deref()
    }

    pub fn notice(&self) -> Option<&ListNotice> {
        self.notice.as_ref()
    }

    /// Hand the pending notice to the caller, leaving none behind
    pub fn take_notice(&mut self) -> Option<ListNotice> {
        self.notice.take()
    }

    /// Start a fresh first-page fetch under the current query
    fn issue_first_page(&mut self) -> ListEffect {
        self.generation += 1;
        self.query.page = 1;
        self.collection.is_loading = true;
        self.collection.has_more = true;
        self.collection.error = None;

        ListEffect::FetchPage {
            generation: self.generation,
            mode: FetchMode::Replace,
            request: self.page_request(),
        }
    }

    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.query.page,
            page_size: self.query.page_size,
            category: self.query.category.clone(),
            sort: self.query.sort,
        }
    }

    fn is_current(&self, generation: Generation) -> bool {
        self.mounted && generation == self.generation
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one action and return the next state with the effects to run
pub fn reduce(state: ListState, action: ListAction) -> (ListState, Vec<ListEffect>) {
    match action {
        ListAction::Intent(intent) => on_intent(state, intent),
        ListAction::Response(response) => (on_response(state, response), Vec::new()),
    }
}

fn on_intent(mut state: ListState, intent: ListIntent) -> (ListState, Vec<ListEffect>) {
    if !state.mounted && !matches!(intent, ListIntent::Mount) {
        tracing::debug!("list: ignoring {:?} while unmounted", intent);
        return (state, Vec::new());
    }

    let effects = match intent {
        ListIntent::Mount => {
            let generation = state.generation;
            let mount = state.mount + 1;
            state = ListState::new();
            state.generation = generation;
            state.mount = mount;
            state.mounted = true;
            tracing::info!("list: mounted");
            vec![
                ListEffect::FetchCategories { mount },
                state.issue_first_page(),
            ]
        }
        ListIntent::ChangeCategory(category) => {
            let category = normalize_category(category);
            if category == state.query.category && !state.query.is_searching() {
                tracing::debug!("list: category unchanged ({:?})", category);
                Vec::new()
            } else {
                tracing::debug!("list: category -> {:?}", category);
                state.query.category = category;
                state.query.search_term = None;
                vec![state.issue_first_page()]
            }
        }
        ListIntent::ChangeSort(sort) => {
            if sort == state.query.sort && !state.query.is_searching() {
                tracing::debug!("list: sort unchanged ({})", sort);
                Vec::new()
            } else {
                tracing::debug!("list: sort -> {:?}", sort);
                state.query.sort = sort;
                state.query.search_term = None;
                vec![state.issue_first_page()]
            }
        }
        ListIntent::Search(term) => {
            // Blank input only decides the mode; real terms go out as typed
            if term.trim().is_empty() {
                if state.query.is_searching() {
                    tracing::debug!("list: search cleared, restoring listing");
                    state.query.search_term = None;
                    vec![state.issue_first_page()]
                } else {
                    Vec::new()
                }
            } else {
                tracing::debug!("list: search '{}'", term);
                state.generation += 1;
                state.query.search_term = Some(term.clone());
                state.collection.is_loading = true;
                state.collection.has_more = false;
                state.collection.error = None;
                vec![ListEffect::Search {
                    generation: state.generation,
                    term,
                }]
            }
        }
        ListIntent::LoadMore => {
            if state.collection.is_loading
                || !state.collection.has_more
                || state.query.is_searching()
            {
                tracing::debug!(
                    "list: load more ignored (loading={}, has_more={}, searching={})",
                    state.collection.is_loading,
                    state.collection.has_more,
                    state.query.is_searching()
                );
                Vec::new()
            } else {
                state.collection.is_loading = true;
                state.collection.error = None;
                tracing::debug!("list: loading page {}", state.query.page);
                vec![ListEffect::FetchPage {
                    generation: state.generation,
                    mode: FetchMode::Append,
                    request: state.page_request(),
                }]
            }
        }
        ListIntent::Refresh => {
            if state.query.is_searching() {
                let term = state.query.search_term.clone().unwrap_or_default();
                return on_intent(state, ListIntent::Search(term));
            }
            vec![state.issue_first_page()]
        }
        ListIntent::Unmount => {
            state.mounted = false;
            state.generation += 1;
            state.collection.is_loading = false;
            tracing::info!("list: unmounted");
            vec![ListEffect::CancelInFlight]
        }
    };

    (state, effects)
}

fn on_response(mut state: ListState, response: ListResponse) -> ListState {
    match response {
        ListResponse::Page {
            generation,
            mode,
            request,
            result,
        } => {
            if !state.is_current(generation) {
                tracing::debug!(
                    "list: dropping stale page {} (generation {} != {})",
                    request.page,
                    generation,
                    state.generation
                );
                return state;
            }

            state.collection.is_loading = false;
            match result {
                Ok(products) => {
                    let count = products.len();
                    match mode {
                        FetchMode::Replace => state.collection.items = products,
                        FetchMode::Append => state.collection.items.extend(products),
                    }
                    state.query.page = request.page + 1;
                    // A short page is the last one
                    state.collection.has_more = count >= request.page_size as usize;
                    state.collection.error = None;
                    if mode == FetchMode::Append {
                        state.notice = Some(if state.collection.has_more {
                            ListNotice::LoadedMore(count)
                        } else {
                            ListNotice::EndOfList
                        });
                    }
                    tracing::debug!(
                        "list: page {} brought {} items (total {}, has_more={})",
                        request.page,
                        count,
                        state.collection.items.len(),
                        state.collection.has_more
                    );
                }
                Err(e) => {
                    tracing::warn!("list: fetching page {} failed: {}", request.page, e);
                    state.collection.error = Some(LIST_ERROR_MESSAGE.to_string());
                    if mode == FetchMode::Replace {
                        // Items still belong to the previous query
                        state.collection.has_more = false;
                    }
                }
            }
        }
        ListResponse::Search {
            generation,
            term,
            result,
        } => {
            if !state.is_current(generation) {
                tracing::debug!("list: dropping stale search results for '{}'", term);
                return state;
            }

            state.collection.is_loading = false;
            state.collection.has_more = false;
            match result {
                Ok(products) => {
                    tracing::debug!("list: search '{}' found {} items", term, products.len());
                    state.collection.items = products;
                    state.collection.error = None;
                }
                Err(e) => {
                    tracing::warn!("list: search '{}' failed: {}", term, e);
                    state.collection.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                }
            }
        }
        ListResponse::Categories { mount, result } => {
            if !state.mounted || mount != state.mount {
                tracing::debug!("list: dropping categories from mount {}", mount);
                return state;
            }
            match result {
                Ok(categories) => state.categories = categories,
                Err(e) => {
                    tracing::warn!("list: fetching categories failed: {}", e);
                    state.notice = Some(ListNotice::CategoriesUnavailable);
                }
            }
        }
    }

    state
}
