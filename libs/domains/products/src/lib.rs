//! Products Domain
//!
//! Versioned (1.0 and 2.0) catalog of products over a pluggable store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints per version, unversioned alias
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, mapping, JSON Patch, one commit per call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Store + session traits (fixture, in-memory, Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product entity, versioned DTOs and mappings
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_products::{handlers, service::ProductService, store::InMemoryProductStore};
//!
//! let service = Arc::new(ProductService::new(InMemoryProductStore::seeded()));
//!
//! // Nest under /api: /api/v1/products, /api/v2/products, /api/products
//! let router = axum::Router::new().nest("/api", handlers::router(service));
//! ```

pub mod contract;
pub mod dto;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod models;
pub mod patch;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use contract::{ApiContract, ApiVersion, V1, V2};
pub use error::{ProductError, ProductResult};
pub use models::Product;
pub use patch::{PatchDocument, PatchError, PatchOperation};
pub use postgres::PgProductStore;
pub use repository::{ProductRepository, ProductStore};
pub use service::ProductService;
pub use store::{FixtureProductStore, InMemoryProductStore};
