//! # Core Event Types
//!
//! Routes and input focus shared by commands, the view model and the views.

/// Screen currently shown
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Listing,
    /// Detail page keyed by product id
    Detail(String),
}

impl Route {
    pub fn is_listing(&self) -> bool {
        matches!(self, Self::Listing)
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Self::Detail(_))
    }
}

/// Where keystrokes go on the listing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Moving through the product cards
    Browse,
    /// Typing into the search input
    Search,
    /// Choosing from the category picker
    CategoryPicker,
    /// Choosing from the sort picker
    SortPicker,
}

impl Focus {
    /// Whether printable keys are text input rather than shortcuts
    pub fn captures_text(&self) -> bool {
        matches!(self, Self::Search)
    }

    pub fn is_picker(&self) -> bool {
        matches!(self, Self::CategoryPicker | Self::SortPicker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_search_focus_should_capture_text() {
        assert!(Focus::Search.captures_text());
        assert!(!Focus::Browse.captures_text());
        assert!(!Focus::CategoryPicker.captures_text());
    }

    #[test]
    fn route_predicates_should_match_variants() {
        assert!(Route::Listing.is_listing());
        assert!(Route::Detail("1".into()).is_detail());
        assert!(!Route::Landing.is_listing());
    }
}
