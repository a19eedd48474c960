//! # Services Layer
//!
//! External resources the controllers talk to. The controllers only see the
//! `CatalogApi` trait; `HttpCatalogClient` is the production implementation
//! and `InMemoryCatalog` the one tests run against.

pub mod api;
pub mod http;
pub mod memory;

pub use api::{ApiError, CatalogApi, PageRequest};
pub use http::HttpCatalogClient;
pub use memory::{sample_product, sample_products, CatalogCall, InMemoryCatalog};
