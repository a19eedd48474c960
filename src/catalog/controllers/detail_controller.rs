//! # Detail Controller
//!
//! Single fetch-by-id lifecycle for the detail view. Any failure resolves to
//! `NotFound`; the cause only reaches the log.

use crate::catalog::models::ProductDetails;
use crate::catalog::services::ApiError;

use super::list_controller::Generation;

/// Rendered outcome of a finished lookup
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Box<ProductDetails>),
    NotFound,
}

/// Lifecycle of the detail view
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Resolved(DetailOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    /// Detail view appeared for this product id
    Mount(String),
    Loaded {
        generation: Generation,
        result: Result<ProductDetails, ApiError>,
    },
    Unmount,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailEffect {
    Fetch { generation: Generation, id: String },
    CancelInFlight,
}

/// State owned by one detail view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModel {
    product_id: Option<String>,
    state: DetailState,
    generation: Generation,
    mounted: bool,
}

impl DetailModel {
    pub fn new() -> Self {
        Self {
            product_id: None,
            state: DetailState::Loading,
            generation: 0,
            mounted: false,
        }
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn details(&self) -> Option<&ProductDetails> {
        match &self.state {
            DetailState::Resolved(DetailOutcome::Found(details)) => Some(&**details),
            _ => None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Default for DetailModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn reduce_detail(mut model: DetailModel, action: DetailAction) -> (DetailModel, Vec<DetailEffect>) {
    match action {
        DetailAction::Mount(id) => {
            model.generation += 1;
            model.mounted = true;
            model.state = DetailState::Loading;
            model.product_id = Some(id.clone());
            tracing::info!("detail: mounted for '{}'", id);
            let effects = vec![DetailEffect::Fetch {
                generation: model.generation,
                id,
            }];
            (model, effects)
        }
        DetailAction::Loaded { generation, result } => {
            if !model.mounted || generation != model.generation {
                tracing::debug!("detail: dropping stale response (generation {})", generation);
                return (model, Vec::new());
            }

            model.state = match result {
                Ok(details) => {
                    tracing::debug!("detail: loaded '{}'", details.product.id);
                    DetailState::Resolved(DetailOutcome::Found(Box::new(details)))
                }
                Err(ApiError::NotFound(id)) => {
                    tracing::info!("detail: no product '{}'", id);
                    DetailState::Resolved(DetailOutcome::NotFound)
                }
                Err(e) => {
                    tracing::warn!("detail: lookup failed, showing not found: {}", e);
                    DetailState::Resolved(DetailOutcome::NotFound)
                }
            };
            (model, Vec::new())
        }
        DetailAction::Unmount => {
            model.mounted = false;
            model.generation += 1;
            tracing::info!("detail: unmounted");
            (model, vec![DetailEffect::CancelInFlight])
        }
    }
}
