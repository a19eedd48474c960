//! # Views Module
//!
//! Presentational components and the renderer that puts them on screen.

pub mod components;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use components::{Line, Span, SpanStyle};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
