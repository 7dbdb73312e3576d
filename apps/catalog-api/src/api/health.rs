//! Readiness endpoint

use std::sync::Arc;

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use domain_products::{ProductService, ProductStore};

async fn ready<S: ProductStore>(State(service): State<Arc<ProductService<S>>>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "store",
        Box::pin(async { service.ping().await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router<S: ProductStore>(service: Arc<ProductService<S>>) -> Router {
    Router::new().route("/ready", get(ready::<S>)).with_state(service)
}
