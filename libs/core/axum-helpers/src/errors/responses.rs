//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, ProblemDetails};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"max": 255, "value": "…"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Patch document could not be applied",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INVALID_PATCH",
        "message": "path '/colour' does not exist",
        "details": null
    })
)]
pub struct BadRequestPatchResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Patched resource failed validation",
    content_type = "application/json",
    example = json!({
        "code": 1006,
        "error": "UNPROCESSABLE_ENTITY",
        "message": "Request validation failed",
        "details": {
            "name": [{"code": "required", "message": null, "params": {}}]
        }
    })
)]
pub struct UnprocessablePatchResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(description = "Resource not found (empty body)")]
pub struct NotFoundResponse;

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/problem+json",
    example = json!({
        "type": "https://tools.ietf.org/html/rfc7231#section-6.6.4",
        "title": "Service Unavailable",
        "status": 503,
        "detail": "Store operation timed out after 5s"
    })
)]
pub struct ServiceUnavailableResponse(pub ProblemDetails);
