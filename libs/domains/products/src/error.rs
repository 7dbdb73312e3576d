use std::time::Duration;

use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, validation_details};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

use crate::patch::PatchError;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid patch: {0}")]
    InvalidPatch(#[from] PatchError),

    /// The patch applied, but the result is not a valid update.
    #[error("Patched product is invalid: {message}")]
    UnprocessablePatch {
        message: String,
        errors: Option<ValidationErrors>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation not supported by this store: {0}")]
    Unsupported(&'static str),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::InvalidPatch(e) => AppError::InvalidPatch(e.to_string()),
            ProductError::UnprocessablePatch { message, errors } => AppError::UnprocessableEntity {
                message,
                details: errors.as_ref().map(validation_details),
            },
            ProductError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
            other => AppError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Store(err.to_string())
    }
}
