//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for both catalog versions
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Product catalog with side-by-side API versions 1.0 and 2.0",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/products", api = domain_products::handlers::v1::ApiDoc),
        (path = "/api/v2/products", api = domain_products::handlers::v2::ApiDoc)
    )
)]
pub struct ApiDoc;
