//! Uncaught failures handed to the translation layer.
//!
//! A handler that cannot classify an error returns a [`Failure`]. Its response
//! is a default problem document that also carries the failure as a response
//! extension, so [`translate_failures`](super::translate::translate_failures)
//! can re-render it according to the configured [`ErrorStrategy`](super::ErrorStrategy).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ProblemDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Caller supplied an argument the store refuses.
    InvalidArgument,
    /// Anything else: store errors, timeouts, unsupported operations, panics.
    Unavailable,
}

impl FailureKind {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails::new(self.kind.status()).with_detail(self.message.clone())
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let mut response = self.problem().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_response_carries_extension() {
        let response = Failure::invalid_argument("id must be unassigned").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let failure = response.extensions().get::<Failure>().unwrap();
        assert_eq!(failure.kind, FailureKind::InvalidArgument);
        assert_eq!(failure.message, "id must be unassigned");
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let failure = Failure::unavailable("store timed out");
        assert_eq!(failure.problem().status, 503);
        assert_eq!(failure.problem().detail.as_deref(), Some("store timed out"));
    }
}
