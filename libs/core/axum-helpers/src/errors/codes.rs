use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error codes shared by every JSON error envelope.
///
/// Each variant carries a SCREAMING_SNAKE_CASE identifier for clients, an
/// integer code for logs, and a default human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// Request payload failed validation
    ValidationError,
    /// Request body could not be parsed as JSON
    InvalidJson,
    /// Path parameter could not be parsed
    InvalidPath,
    /// Resource or route not found
    NotFound,
    /// Patch document is malformed or cannot be applied
    InvalidPatch,
    /// Patched resource is no longer acceptable
    UnprocessableEntity,
    /// Requested API version is not served
    UnsupportedApiVersion,
    /// Argument rejected by the store
    InvalidArgument,

    // Server errors (2000s)
    /// Unexpected failure
    InternalError,
    /// Backing service failed or timed out
    ServiceUnavailable,
}

impl ErrorCode {
    /// Identifier for client consumption.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
    /// assert_eq!(ErrorCode::UnsupportedApiVersion.as_str(), "UNSUPPORTED_API_VERSION");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::InvalidPath => "INVALID_PATH",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidPatch => "INVALID_PATCH",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::UnsupportedApiVersion => "UNSUPPORTED_API_VERSION",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1002,
            Self::InvalidPath => 1003,
            Self::NotFound => 1004,
            Self::InvalidPatch => 1005,
            Self::UnprocessableEntity => 1006,
            Self::UnsupportedApiVersion => 1007,
            Self::InvalidArgument => 1008,
            Self::InternalError => 2001,
            Self::ServiceUnavailable => 2002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidJson => "Invalid JSON format",
            Self::InvalidPath => "Invalid path parameter",
            Self::NotFound => "Resource not found",
            Self::InvalidPatch => "Patch document could not be applied",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::UnsupportedApiVersion => "The requested API version is not supported",
            Self::InvalidArgument => "Invalid argument",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
