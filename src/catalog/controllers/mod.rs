//! # Controllers Module
//!
//! The list and detail state machines, the sessions that run their effects,
//! and the application controller that owns the event loop.

pub mod app_controller;
pub mod detail_controller;
pub mod list_controller;
pub mod session;

// Re-export main types for convenience
pub use app_controller::AppController;
pub use detail_controller::{reduce_detail, DetailAction, DetailModel, DetailOutcome, DetailState};
pub use list_controller::{
    reduce, FetchMode, Generation, ListAction, ListEffect, ListIntent, ListNotice, ListResponse,
    ListState, LIST_ERROR_MESSAGE, SEARCH_ERROR_MESSAGE,
};
pub use session::{DetailSession, ListSession, TaskRunner};
