//! HTTP handlers for version 2.0 of the products API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        OriginalUri, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestPatchResponse, BadRequestValidationResponse, NotFoundResponse,
        ServiceUnavailableResponse, UnprocessablePatchResponse,
    },
};
use utoipa::OpenApi;

use crate::contract::V2;
use crate::dto::v2::{ProductCreateDto, ProductReadDto, ProductUpdateDto};
use crate::error::ProductError;
use crate::patch::{PatchDocument, PatchError, PatchOperation};
use crate::repository::ProductStore;
use crate::service::ProductService;

/// OpenAPI documentation for Products API v2
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product, create_product, update_product, patch_product, delete_product),
    components(
        schemas(ProductReadDto, ProductCreateDto, ProductUpdateDto, PatchDocument, PatchOperation),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPatchResponse,
            UnprocessablePatchResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Products v2", description = "Product catalog, version 2.0 (with vendor)")
    )
)]
pub struct ApiDoc;

pub fn router<S: ProductStore>(service: Arc<ProductService<S>>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products v2",
    responses(
        (status = 200, description = "All products", body = Vec<ProductReadDto>),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
) -> Result<Json<Vec<ProductReadDto>>, AppError> {
    Ok(Json(service.list::<V2>().await?))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductReadDto),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ProductReadDto>, AppError> {
    let Path(id) = id?;
    Ok(Json(service.get::<V2>(id).await?))
}

/// Create a product
///
/// Responds with the stored product and its location.
#[utoipa::path(
    post,
    path = "",
    tag = "Products v2",
    request_body = ProductCreateDto,
    responses(
        (status = 201, description = "Product created", body = ProductReadDto,
            headers(("location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(dto): ValidatedJson<ProductCreateDto>,
) -> Result<impl IntoResponse, AppError> {
    let created = service.create::<V2>(dto).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), created.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductUpdateDto,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProductUpdateDto>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    service.update::<V2>(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a JSON Patch to a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = i32, Path, description = "Product id")),
    request_body(content = PatchDocument, content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Product patched"),
        (status = 400, response = BadRequestPatchResponse),
        (status = 404, response = NotFoundResponse),
        (status = 422, response = UnprocessablePatchResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn patch_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PatchDocument>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload.map_err(|e| ProductError::from(PatchError::Malformed(e.body_text())))?;
    service.patch::<V2>(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
