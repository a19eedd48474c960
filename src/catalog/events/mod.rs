//! # Events Module
//!
//! Routes, focus and the view/input events passed between layers.

pub mod types;
pub mod view_events;

// Re-export all types for easy access
pub use types::{Focus, Route};
pub use view_events::{InputEvent, ViewEvent};
