//! # Catalog API Contract
//!
//! The four remote operations the controllers depend on. Implementations
//! must not cache or retry: every call is one fresh request.

use crate::catalog::models::{Product, ProductDetails, SortKey};
use async_trait::async_trait;

/// Failure of a catalog API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete, or the server answered with an error status
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The backend has no product with this id
    #[error("product '{0}' not found")]
    NotFound(String),
}

/// Parameters of a product list page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    pub category: Option<String>,
    pub sort: SortKey,
}

/// Remote catalog operations
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of products
    async fn list_products(&self, request: &PageRequest) -> Result<Vec<Product>, ApiError>;

    /// Fetch every category name, in server order
    async fn list_categories(&self) -> Result<Vec<String>, ApiError>;

    /// Full-text search; an empty term is passed through unchanged
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError>;

    /// Fetch one product's details
    async fn get_product_by_id(&self, id: &str) -> Result<ProductDetails, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_should_describe_cause() {
        assert_eq!(
            ApiError::NotFound("999".to_string()).to_string(),
            "product '999' not found"
        );
        assert!(ApiError::Network("connection refused".to_string())
            .to_string()
            .contains("connection refused"));
    }
}
