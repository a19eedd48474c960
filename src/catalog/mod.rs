//! # Catalog Browser
//!
//! MVVM terminal front end for the food catalog API.
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐   Intents    ┌─────────────┐
//! │    View     │◄─────────────│  ViewModel   │─────────────▶│ Controllers │
//! │ - Renderer  │              │ - Focus      │              │ - List      │
//! │ - Components│              │ - Selection  │◄─────────────│ - Detail    │
//! └─────────────┘              │ - Search box │    State     └──────┬──────┘
//!                              └──────────────┘                     │ Effects
//!                                     ▲                             ▼
//!                                     │ Command events       ┌─────────────┐
//!                              ┌──────────────┐              │ CatalogApi  │
//!                              │AppController │              │ (HTTP)      │
//!                              │ - Key mapping│              └─────────────┘
//!                              │ - Event loop │
//!                              └──────────────┘
//! ```

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

pub use controllers::AppController;
pub use services::{ApiError, CatalogApi, HttpCatalogClient};
