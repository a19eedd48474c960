//! # In-Memory Catalog
//!
//! A `CatalogApi` backed by a vector of products. It records every call and
//! can be told to slow down or fail, which makes it the stand-in for the
//! HTTP client in controller and event loop tests.

use super::api::{ApiError, CatalogApi, PageRequest};
use crate::catalog::models::{Nutriments, NutritionGrade, Product, ProductDetails, SortKey};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    ListProducts(PageRequest),
    ListCategories,
    Search(String),
    GetProduct(String),
}

#[derive(Debug, Default)]
struct Behavior {
    delay: Duration,
    category_delays: HashMap<String, Duration>,
    failure: Option<ApiError>,
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<ProductDetails>,
    categories: Vec<String>,
    behavior: Mutex<Behavior>,
    calls: Mutex<Vec<CatalogCall>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductDetails>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Delay applied to every call
    pub fn with_delay(self, delay: Duration) -> Self {
        self.lock_behavior().delay = delay;
        self
    }

    /// Delay applied to list calls filtered by `category`, overriding the default
    pub fn set_category_delay(&self, category: &str, delay: Duration) {
        self.lock_behavior()
            .category_delays
            .insert(category.to_string(), delay);
    }

    /// Make every following call fail with `error`; `None` restores service
    pub fn set_failure(&self, error: Option<ApiError>) {
        self.lock_behavior().failure = error;
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.lock_calls().clone()
    }

    pub fn list_calls(&self) -> Vec<PageRequest> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                CatalogCall::ListProducts(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                CatalogCall::Search(term) => Some(term.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock_behavior(&self) -> std::sync::MutexGuard<'_, Behavior> {
        // A poisoned lock only means a test thread panicked mid-call
        self.behavior
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<CatalogCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call, wait out the configured delay, then report any failure
    async fn enter(&self, call: CatalogCall) -> Result<(), ApiError> {
        let (delay, failure) = {
            let behavior = self.lock_behavior();
            let delay = match &call {
                CatalogCall::ListProducts(PageRequest {
                    category: Some(category),
                    ..
                }) => behavior
                    .category_delays
                    .get(category)
                    .copied()
                    .unwrap_or(behavior.delay),
                _ => behavior.delay,
            };
            (delay, behavior.failure.clone())
        };
        self.lock_calls().push(call);

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogApi for InMemoryCatalog {
    async fn list_products(&self, request: &PageRequest) -> Result<Vec<Product>, ApiError> {
        self.enter(CatalogCall::ListProducts(request.clone())).await?;

        let mut matching: Vec<&Product> = self
            .products
            .iter()
            .map(|details| &details.product)
            .filter(|product| match &request.category {
                Some(category) => product.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .collect();
        sort_products(&mut matching, request.sort);

        let page_size = request.page_size.max(1) as usize;
        let start = (request.page.max(1) as usize - 1) * page_size;
        Ok(matching
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.enter(CatalogCall::ListCategories).await?;
        Ok(self.categories.clone())
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        self.enter(CatalogCall::Search(term.to_string())).await?;

        let needle = term.to_lowercase();
        Ok(self
            .products
            .iter()
            .map(|details| &details.product)
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn get_product_by_id(&self, id: &str) -> Result<ProductDetails, ApiError> {
        self.enter(CatalogCall::GetProduct(id.to_string())).await?;

        self.products
            .iter()
            .find(|details| details.product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}

fn sort_products(products: &mut [&Product], sort: SortKey) {
    // Ungraded products go last in both grade orders
    match sort {
        SortKey::None => {}
        SortKey::NameAsc => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => products.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::GradeAsc => {
            products.sort_by_key(|p| (p.nutrition_grade.is_none(), p.nutrition_grade))
        }
        SortKey::GradeDesc => products.sort_by_key(|p| {
            (
                p.nutrition_grade.is_none(),
                std::cmp::Reverse(p.nutrition_grade),
            )
        }),
    }
}

/// Build a product record with the fields the list screen shows
pub fn sample_product(
    id: &str,
    name: &str,
    category: Option<&str>,
    grade: Option<NutritionGrade>,
) -> ProductDetails {
    ProductDetails {
        product: Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.map(str::to_string),
            image_url: None,
            ingredients: Vec::new(),
            nutrition_grade: grade,
        },
        nutriments: Nutriments::default(),
        labels: Vec::new(),
    }
}

/// `count` uncategorised products named `Product 1..=count`
pub fn sample_products(count: usize) -> Vec<ProductDetails> {
    (1..=count)
        .map(|i| sample_product(&i.to_string(), &format!("Product {i}"), None, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u32, category: Option<&str>, sort: SortKey) -> PageRequest {
        PageRequest {
            page,
            page_size: 20,
            category: category.map(str::to_string),
            sort,
        }
    }

    #[tokio::test]
    async fn list_products_should_slice_pages() {
        let catalog = InMemoryCatalog::new(sample_products(25));

        let first = catalog.list_products(&request(1, None, SortKey::None)).await;
        let second = catalog.list_products(&request(2, None, SortKey::None)).await;

        assert_eq!(first.map(|p| p.len()), Ok(20));
        let second = second.unwrap_or_default();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].id, "21");
        assert_eq!(catalog.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn list_products_should_filter_and_sort() {
        let catalog = InMemoryCatalog::new(vec![
            sample_product("1", "Cola", Some("drinks"), Some(NutritionGrade::E)),
            sample_product("2", "Apple", Some("fruit"), Some(NutritionGrade::A)),
            sample_product("3", "Water", Some("drinks"), Some(NutritionGrade::A)),
            sample_product("4", "Juice", Some("drinks"), None),
        ]);

        let drinks = catalog
            .list_products(&request(1, Some("drinks"), SortKey::GradeAsc))
            .await
            .unwrap_or_default();
        let ids: Vec<&str> = drinks.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "4"]);

        let by_name = catalog
            .list_products(&request(1, None, SortKey::NameDesc))
            .await
            .unwrap_or_default();
        assert_eq!(by_name[0].name, "Water");
    }

    #[tokio::test]
    async fn search_should_match_names_case_insensitively() {
        let catalog = InMemoryCatalog::new(vec![
            sample_product("1", "Dark Chocolate", None, None),
            sample_product("2", "Milk", None, None),
        ]);

        let found = catalog.search_products("chocolate").await.unwrap_or_default();
        assert_eq!(found.len(), 1);
        assert_eq!(catalog.search_calls(), vec!["chocolate".to_string()]);
    }

    #[tokio::test]
    async fn unknown_id_should_be_not_found() {
        let catalog = InMemoryCatalog::new(sample_products(1));
        assert_eq!(
            catalog.get_product_by_id("999").await,
            Err(ApiError::NotFound("999".to_string()))
        );
    }

    #[tokio::test]
    async fn failure_should_apply_until_cleared() {
        let catalog = InMemoryCatalog::new(sample_products(1));
        catalog.set_failure(Some(ApiError::Network("down".to_string())));
        assert!(catalog.list_categories().await.is_err());

        catalog.set_failure(None);
        assert!(catalog.list_categories().await.is_ok());
        assert_eq!(catalog.calls().len(), 2);
    }
}
