//! # Pantry - Terminal Food Catalog Browser
//!
//! Browse, search and filter a food product catalog served over HTTP, with
//! infinite scrolling and per-product detail pages.
//!
//! The list and detail screens are driven by pure state machines
//! (`catalog::controllers::list_controller`, `detail_controller`) whose
//! effects are run as tokio tasks. Every fetch carries the generation it was
//! issued under, so a slow response can never overwrite newer state.

pub mod catalog;
pub mod cmd_args;
pub mod config;
pub mod logging;

// Re-export main types for easy access
pub use catalog::*;
