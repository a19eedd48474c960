//! # List Query
//!
//! The filter state the product list is fetched under.

use std::fmt;
use std::str::FromStr;

/// Number of products requested per page
pub const PAGE_SIZE: u32 = 20;

/// Server-side ordering of the product list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Server default order
    #[default]
    None,
    NameAsc,
    NameDesc,
    GradeAsc,
    GradeDesc,
}

impl SortKey {
    /// Every option in the order the sort select shows them
    pub const ALL: [SortKey; 5] = [
        Self::None,
        Self::NameAsc,
        Self::NameDesc,
        Self::GradeAsc,
        Self::GradeDesc,
    ];

    /// Value sent in the `sort` query parameter, `None` for server default
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::NameAsc => Some("name_asc"),
            Self::NameDesc => Some("name_desc"),
            Self::GradeAsc => Some("grade_asc"),
            Self::GradeDesc => Some("grade_desc"),
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Sort by",
            Self::NameAsc => "Name (A → Z)",
            Self::NameDesc => "Name (Z → A)",
            Self::GradeAsc => "Nutrition Grade (A → E)",
            Self::GradeDesc => "Nutrition Grade (E → A)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param().unwrap_or(""))
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::None),
            "name_asc" => Ok(Self::NameAsc),
            "name_desc" => Ok(Self::NameDesc),
            "grade_asc" => Ok(Self::GradeAsc),
            "grade_desc" => Ok(Self::GradeDesc),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// Current filter state of the product list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Next page to request, starting at 1
    pub page: u32,
    pub page_size: u32,
    pub category: Option<String>,
    pub sort: SortKey,
    /// `Some` while the list shows search results instead of pages
    pub search_term: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
            category: None,
            sort: SortKey::None,
            search_term: None,
        }
    }

    /// Whether the list currently shows search results
    pub fn is_searching(&self) -> bool {
        self.search_term.is_some()
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalise a category pick: blank means "All Categories"
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_should_round_trip_through_param_strings() {
        for key in SortKey::ALL {
            let param = key.as_param().unwrap_or("");
            assert_eq!(param.parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn sort_key_should_reject_unknown_values() {
        assert!("price_asc".parse::<SortKey>().is_err());
    }

    #[test]
    fn list_query_should_start_on_first_page() {
        let query = ListQuery::new();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 20);
        assert_eq!(query.category, None);
        assert_eq!(query.sort, SortKey::None);
        assert!(!query.is_searching());
    }

    #[test]
    fn normalize_category_should_drop_blank_values() {
        assert_eq!(normalize_category(Some("  ".to_string())), None);
        assert_eq!(normalize_category(None), None);
        assert_eq!(
            normalize_category(Some("snacks".to_string())),
            Some("snacks".to_string())
        );
    }
}
