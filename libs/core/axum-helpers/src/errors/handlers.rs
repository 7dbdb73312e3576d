use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse, ProblemDetails};

/// Fallback handler for unknown routes.
pub async fn not_found(uri: Uri) -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::NotFound,
        format!("No route for {}", uri.path()),
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// The `/error` route.
///
/// Failures are rendered by the translation middleware, never by this handler;
/// a client requesting it directly has no failure to report.
pub async fn error_route() -> Response {
    ProblemDetails::new(StatusCode::NOT_FOUND).into_response()
}
