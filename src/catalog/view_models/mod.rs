//! # ViewModel Module
//!
//! The ViewModel split into focused responsibilities: navigation between
//! screens, the listing screen, the search box and response handling.

mod core;
mod listing_manager;
mod navigation_manager;
mod response_manager;
pub mod search_input;
mod search_manager;

pub use core::{ViewModel, CARD_HEIGHT, CHROME_HEIGHT, LOAD_MORE_THRESHOLD};
pub use listing_manager::ALL_CATEGORIES_LABEL;
pub use search_input::SearchInput;
