//! API routes module

pub mod health;
pub mod products;

use std::sync::Arc;

use axum::Router;
use domain_products::{ProductService, ProductStore};

/// Routers built around one product store.
pub struct Routes {
    /// Nested under `/api` by the application router
    pub api: Router,
    /// Top-level probes (`/ready`)
    pub probes: Router,
}

/// Create all routes for `store`
pub fn routes<S: ProductStore>(store: S) -> Routes {
    let service = Arc::new(ProductService::new(store));

    Routes {
        api: products::router(Arc::clone(&service)),
        probes: health::router(service),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::{ErrorStrategy, FailureTranslator, RouterOptions, create_router};
    use domain_products::{FixtureProductStore, InMemoryProductStore};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::openapi::ApiDoc;

    fn app<S: ProductStore>(store: S, options: RouterOptions) -> Router {
        let Routes { api, probes } = routes(store);
        create_router::<ApiDoc>(api, &options).merge(probes)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn create_request() -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/products")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"name": "Keyboard X", "quantity": 3, "price": 59.99, "vendorGuid": "abc-123"}).to_string(),
            ))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_products_served_under_api() {
        let response = app(InMemoryProductStore::seeded(), RouterOptions::default())
            .oneshot(get("/api/v2/products/1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "Vortex Race 3");
    }

    #[tokio::test]
    async fn test_created_location_includes_api_prefix() {
        let response = app(InMemoryProductStore::seeded(), RouterOptions::default())
            .oneshot(create_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/products/5");
    }

    #[tokio::test]
    async fn test_unsupported_operation_renders_problem() {
        let response = app(FixtureProductStore::new(), RouterOptions::default())
            .oneshot(create_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["status"], 503);
        assert!(body["detail"].as_str().unwrap().contains("create"));
    }

    #[tokio::test]
    async fn test_middleware_strategy_renders_fixed_500() {
        let options = RouterOptions {
            failures: FailureTranslator::new(ErrorStrategy::Middleware, Duration::from_millis(10)),
            ..RouterOptions::default()
        };
        let response = app(FixtureProductStore::new(), options)
            .oneshot(create_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"statusCode": 500, "message": "Internal Server Error."})
        );
    }

    #[tokio::test]
    async fn test_not_found_is_identical_under_both_strategies() {
        for strategy in [ErrorStrategy::Problem, ErrorStrategy::Middleware] {
            let options = RouterOptions {
                failures: FailureTranslator::new(strategy, Duration::from_millis(10)),
                ..RouterOptions::default()
            };
            let response = app(InMemoryProductStore::seeded(), options)
                .oneshot(get("/api/v1/products/999"))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_ready_reports_store() {
        let response = app(InMemoryProductStore::seeded(), RouterOptions::default())
            .oneshot(get("/ready"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_both_versions() {
        let options = RouterOptions {
            docs_enabled: true,
            ..RouterOptions::default()
        };
        let response = app(InMemoryProductStore::seeded(), options)
            .oneshot(get("/api-docs/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let paths = json_body(response).await["paths"].clone();
        assert!(paths.get("/api/v1/products").is_some());
        assert!(paths.get("/api/v2/products/{id}").is_some());
    }
}
