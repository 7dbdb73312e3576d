pub mod codes;
pub mod failure;
pub mod handlers;
pub mod problem;
pub mod responses;
pub mod translate;

pub use codes::ErrorCode;
pub use failure::{Failure, FailureKind};
pub use problem::ProblemDetails;
pub use translate::{ErrorStrategy, FailureTranslator, panic_failure, translate_failures};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Standard error response structure.
///
/// Returned for every classified client error:
/// - `code`: integer error code for logging/monitoring (e.g., 1001)
/// - `error`: machine-readable identifier (e.g., "VALIDATION_ERROR")
/// - `message`: human-readable message
/// - `details`: optional structured details (e.g., field errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "details": { "name": [{ "code": "required", "message": null, "params": {} }] }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Client errors render the [`ErrorResponse`] envelope, except `NotFound`
/// which is an empty 404. `InvalidArgument` and `ServiceUnavailable` render
/// as a [`Failure`] so the translation middleware decides their final shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Unprocessable Entity: {message}")]
    UnprocessableEntity {
        message: String,
        details: Option<Value>,
    },

    #[error("Unsupported API version: {0}")]
    UnsupportedApiVersion(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidJson, e.body_text()),
                )
            }
            AppError::PathRejection(e) => {
                tracing::info!(error_code = ErrorCode::InvalidPath.code(), "Path extraction error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidPath, e.body_text()),
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        ErrorCode::ValidationError,
                        ErrorCode::ValidationError.default_message(),
                    )
                    .with_details(validation_details(&e)),
                )
            }
            AppError::NotFound(msg) => {
                // Empty body, debug level only
                tracing::debug!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                return StatusCode::NOT_FOUND.into_response();
            }
            AppError::InvalidPatch(msg) => {
                tracing::info!(error_code = ErrorCode::InvalidPatch.code(), "Invalid patch: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::InvalidPatch, msg),
                )
            }
            AppError::UnprocessableEntity { message, details } => {
                tracing::info!(
                    error_code = ErrorCode::UnprocessableEntity.code(),
                    "Unprocessable entity: {}",
                    message
                );
                let mut body = ErrorResponse::new(ErrorCode::UnprocessableEntity, message);
                body.details = details;
                (StatusCode::UNPROCESSABLE_ENTITY, body)
            }
            AppError::UnsupportedApiVersion(version) => {
                tracing::info!(
                    error_code = ErrorCode::UnsupportedApiVersion.code(),
                    "Unsupported API version: {}",
                    version
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        ErrorCode::UnsupportedApiVersion,
                        format!(
                            "{} ('{}')",
                            ErrorCode::UnsupportedApiVersion.default_message(),
                            version
                        ),
                    ),
                )
            }
            AppError::InvalidArgument(msg) => return Failure::invalid_argument(msg).into_response(),
            AppError::ServiceUnavailable(msg) => return Failure::unavailable(msg).into_response(),
        };

        (status, Json(body)).into_response()
    }
}

/// Field-keyed validation details: `{ field: [{ code, message, params }] }`.
///
/// Nested struct and list errors are flattened with dotted / indexed keys.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut details = Map::new();
    collect_validation_details(errors, None, &mut details);
    Value::Object(details)
}

fn collect_validation_details(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                let entries = errors
                    .iter()
                    .map(|err| {
                        json!({
                            "code": err.code,
                            "message": err.message,
                            "params": err.params,
                        })
                    })
                    .collect();
                out.insert(key, Value::Array(entries));
            }
            ValidationErrorsKind::Struct(nested) => collect_validation_details(nested, Some(&key), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_details(nested, Some(&format!("{}[{}]", key, index)), out);
                }
            }
        }
    }
}

/// Helper function to create envelope responses.
///
/// # Example
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::NOT_FOUND,
///     "No route for /api/v3/products".to_string(),
///     ErrorCode::NotFound,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(max = 3))]
        name: String,
        #[validate(range(min = 0))]
        quantity: i32,
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_details_are_field_keyed() {
        let errors = Payload {
            name: "too long".to_string(),
            quantity: -1,
        }
        .validate()
        .unwrap_err();

        let details = validation_details(&errors);
        assert_eq!(details["name"][0]["code"], "length");
        assert_eq!(details["quantity"][0]["code"], "range");
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let errors = Payload {
            name: "abcd".to_string(),
            quantity: 1,
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1001);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
    }

    #[tokio::test]
    async fn test_unprocessable_entity_is_422() {
        let response = AppError::UnprocessableEntity {
            message: "patched document is invalid".to_string(),
            details: None,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_unsupported_version_is_400() {
        let response = AppError::UnsupportedApiVersion("3.0".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "UNSUPPORTED_API_VERSION");
        assert!(body["message"].as_str().unwrap().contains("3.0"));
    }

    #[tokio::test]
    async fn test_unparsable_path_is_400_envelope() {
        use axum::{Router, body::Body, extract::Path, http::Request, routing::get};
        use tower::ServiceExt;

        async fn item(id: Result<Path<i32>, PathRejection>) -> Result<String, AppError> {
            let Path(id) = id?;
            Ok(id.to_string())
        }

        let response = Router::new()
            .route("/items/{id}", get(item))
            .oneshot(Request::builder().uri("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 1003);
        assert_eq!(body["error"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::NotFound("product 9".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_infrastructure_errors_become_failures() {
        let response = AppError::ServiceUnavailable("store timed out".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.extensions().get::<Failure>().map(|f| f.kind),
            Some(FailureKind::Unavailable)
        );
    }
}
