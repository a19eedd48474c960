//! # Collection State
//!
//! The product collection the list view renders, with its loading flags.

use super::product::Product;

/// Products loaded so far plus fetch bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState {
    pub items: Vec<Product>,
    pub has_more: bool,
    pub is_loading: bool,
    /// User-facing message of the last failed fetch
    pub error: Option<String>,
}

impl CollectionState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
            is_loading: false,
            error: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}
