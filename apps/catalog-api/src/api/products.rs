//! Products API routes

use std::sync::Arc;

use axum::Router;
use domain_products::{ProductService, ProductStore, handlers};

/// Create products router: `/v1/products`, `/v2/products` and the
/// unversioned `/products` alias
pub fn router<S: ProductStore>(service: Arc<ProductService<S>>) -> Router {
    handlers::router(service)
}
