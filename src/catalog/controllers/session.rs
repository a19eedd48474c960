//! # Controller Sessions
//!
//! Drive the pure reducers against a live `CatalogApi`. Effects become
//! spawned tokio tasks; each task sends its result back through a channel
//! and the owner applies results with `poll_responses` (non-blocking, used
//! by the event loop) or `process_next` / `settle` (awaiting, used by tests).
//!
//! State is only ever mutated by the owner, never by the tasks.

use crate::catalog::services::CatalogApi;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::detail_controller::{reduce_detail, DetailAction, DetailEffect, DetailModel};
use super::list_controller::{
    reduce, ListAction, ListEffect, ListIntent, ListNotice, ListResponse, ListState,
};

const RESPONSE_CHANNEL_CAPACITY: usize = 16;

/// Spawned fetches plus the channel their results come back on
pub struct TaskRunner<M> {
    tasks: JoinSet<()>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> TaskRunner<M> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);
        Self {
            tasks: JoinSet::new(),
            sender,
            receiver,
        }
    }

    /// Run `future` on the runtime and queue its output
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = M> + Send + 'static,
    {
        let sender = self.sender.clone();
        self.tasks.spawn(async move {
            let message = future.await;
            // Receiver is gone once the session is dropped
            let _ = sender.send(message).await;
        });
    }

    /// Next queued result, without waiting
    pub fn try_next(&mut self) -> Option<M> {
        while let Some(joined) = self.tasks.try_join_next() {
            log_join_error(joined);
        }
        self.receiver.try_recv().ok()
    }

    /// Wait for the next result; `None` once nothing is queued or in flight
    pub async fn next(&mut self) -> Option<M> {
        loop {
            if let Ok(message) = self.receiver.try_recv() {
                return Some(message);
            }
            if self.tasks.is_empty() {
                return None;
            }
            tokio::select! {
                message = self.receiver.recv() => return message,
                joined = self.tasks.join_next() => {
                    if let Some(joined) = joined {
                        log_join_error(joined);
                    }
                }
            }
        }
    }

    /// Abort every task and drop results that were already queued
    pub fn abort_all(&mut self) {
        self.tasks.abort_all();
        while self.receiver.try_recv().is_ok() {}
    }

    /// Number of tasks not yet reaped
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

impl<M: Send + 'static> Default for TaskRunner<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            tracing::error!("fetch task panicked: {}", e);
        }
    }
}

/// Product list controller bound to an API
///
/// Dropping the session aborts whatever is still in flight.
pub struct ListSession {
    api: Arc<dyn CatalogApi>,
    state: ListState,
    runner: TaskRunner<ListResponse>,
}

impl ListSession {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            state: ListState::new(),
            runner: TaskRunner::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Notice left by the last applied response, if any
    pub fn take_notice(&mut self) -> Option<ListNotice> {
        self.state.take_notice()
    }

    /// Handle a user intent. Must be called inside a tokio runtime.
    pub fn dispatch(&mut self, intent: ListIntent) {
        self.apply(ListAction::Intent(intent));
    }

    /// Apply every response that has already arrived
    pub fn poll_responses(&mut self) -> bool {
        let mut changed = false;
        while let Some(response) = self.runner.try_next() {
            self.apply(ListAction::Response(response));
            changed = true;
        }
        changed
    }

    /// Wait for one response and apply it; `false` when nothing is pending
    pub async fn process_next(&mut self) -> bool {
        match self.runner.next().await {
            Some(response) => {
                self.apply(ListAction::Response(response));
                true
            }
            None => false,
        }
    }

    /// Apply responses until no fetch is in flight
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn apply(&mut self, action: ListAction) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = reduce(state, action);
        self.state = state;

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: ListEffect) {
        match effect {
            ListEffect::FetchPage {
                generation,
                mode,
                request,
            } => {
                let api = Arc::clone(&self.api);
                self.runner.spawn(async move {
                    let result = api.list_products(&request).await;
                    ListResponse::Page {
                        generation,
                        mode,
                        request,
                        result,
                    }
                });
            }
            ListEffect::Search { generation, term } => {
                let api = Arc::clone(&self.api);
                self.runner.spawn(async move {
                    let result = api.search_products(&term).await;
                    ListResponse::Search {
                        generation,
                        term,
                        result,
                    }
                });
            }
            ListEffect::FetchCategories { mount } => {
                let api = Arc::clone(&self.api);
                self.runner.spawn(async move {
                    let result = api.list_categories().await;
                    ListResponse::Categories { mount, result }
                });
            }
            ListEffect::CancelInFlight => {
                tracing::debug!("list: aborting {} in-flight fetches", self.runner.in_flight());
                self.runner.abort_all();
            }
        }
    }
}

/// Detail controller bound to an API
pub struct DetailSession {
    api: Arc<dyn CatalogApi>,
    model: DetailModel,
    runner: TaskRunner<DetailAction>,
}

impl DetailSession {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            model: DetailModel::new(),
            runner: TaskRunner::new(),
        }
    }

    pub fn model(&self) -> &DetailModel {
        &self.model
    }

    pub fn mount(&mut self, id: &str) {
        self.apply(DetailAction::Mount(id.to_string()));
    }

    pub fn unmount(&mut self) {
        self.apply(DetailAction::Unmount);
    }

    pub fn poll_responses(&mut self) -> bool {
        let mut changed = false;
        while let Some(action) = self.runner.try_next() {
            self.apply(action);
            changed = true;
        }
        changed
    }

    pub async fn process_next(&mut self) -> bool {
        match self.runner.next().await {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn apply(&mut self, action: DetailAction) {
        let model = std::mem::take(&mut self.model);
        let (model, effects) = reduce_detail(model, action);
        self.model = model;

        for effect in effects {
            match effect {
                DetailEffect::Fetch { generation, id } => {
                    let api = Arc::clone(&self.api);
                    self.runner.spawn(async move {
                        let result = api.get_product_by_id(&id).await;
                        DetailAction::Loaded { generation, result }
                    });
                }
                DetailEffect::CancelInFlight => self.runner.abort_all(),
            }
        }
    }
}
