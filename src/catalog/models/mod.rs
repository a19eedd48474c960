//! # Models Module
//!
//! Plain data: product records, the list query, the collection state and
//! the status line.
//! Nothing in here performs I/O.

pub mod collection;
pub mod product;
pub mod query;
pub mod status_line;

pub use collection::CollectionState;
pub use product::{Nutriments, NutritionGrade, Product, ProductDetails};
pub use query::{normalize_category, ListQuery, SortKey, PAGE_SIZE};
pub use status_line::StatusLine;
