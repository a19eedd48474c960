//! # HTTP Catalog Client
//!
//! `CatalogApi` over reqwest. Each operation is a single GET; status codes
//! and body shapes are mapped onto `ApiError`.

use crate::catalog::models::{Product, ProductDetails};
use crate::catalog::services::api::{ApiError, CatalogApi, PageRequest};
use crate::config::ApiProfile;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// List endpoints answer either with a bare array or wrapped in an object
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductListBody {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl ProductListBody {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::Bare(products) | Self::Wrapped { products } => products,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryListBody {
    Bare(Vec<String>),
    Wrapped { categories: Vec<String> },
}

/// reqwest-backed catalog client
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Create a client from a profile
    pub fn new(profile: &ApiProfile) -> Result<Self> {
        tracing::debug!("Creating HttpCatalogClient for '{}'", profile.base_url);

        let mut base_url = Url::parse(&profile.base_url)
            .with_context(|| format!("Invalid base_url '{}'", profile.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base_url '{}' cannot be used as a base", profile.base_url);
        }
        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = profile.timeout {
            builder = builder.timeout(timeout);
        }
        let user_agent = profile
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("pantry/{}", env!("CARGO_PKG_VERSION")));
        builder = builder.user_agent(user_agent);

        let client = builder.build().context("Failed to build HTTP client")?;
        tracing::info!("HTTP client created for {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::Network(format!("invalid base url {}", self.base_url)))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<(StatusCode, String), ApiError> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("GET {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("reading body of {url} failed: {e}")))?;
        tracing::debug!("GET {} -> {} ({} bytes)", url, status.as_u16(), body.len());

        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let (status, body) = self.get_text(url.clone()).await?;
        if !status.is_success() {
            return Err(ApiError::Network(format!(
                "GET {url} answered {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }
        decode(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_products(&self, request: &PageRequest) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &request.page.to_string());
            query.append_pair("pageSize", &request.page_size.to_string());
            if let Some(category) = &request.category {
                query.append_pair("category", category);
            }
            if let Some(sort) = request.sort.as_param() {
                query.append_pair("sort", sort);
            }
        }

        let body: ProductListBody = self.get_json(url).await?;
        Ok(body.into_products())
    }

    async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["categories"])?;
        let body: CategoryListBody = self.get_json(url).await?;
        Ok(match body {
            CategoryListBody::Bare(categories) | CategoryListBody::Wrapped { categories } => {
                categories
            }
        })
    }

    async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["products", "search"])?;
        url.query_pairs_mut().append_pair("q", term);

        let body: ProductListBody = self.get_json(url).await?;
        Ok(body.into_products())
    }

    async fn get_product_by_id(&self, id: &str) -> Result<ProductDetails, ApiError> {
        let url = self.endpoint(&["products", id])?;
        let (status, body) = self.get_text(url.clone()).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Network(format!(
                "GET {url} answered {}",
                status.as_u16()
            )));
        }
        decode(&body)
    }
}
