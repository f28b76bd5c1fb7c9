use actix_web::{http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Failures surfaced by the matching and chat core.
///
/// Every variant is per-request and recoverable; the core never retries and
/// never leaves partial writes behind a failed operation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("profile is not complete")]
    ProfileIncomplete,

    #[error("target already liked")]
    AlreadyLiked,

    #[error("target already disliked")]
    AlreadyDisliked,

    #[error("users are not matched")]
    NotMatched,
}

impl CoreError {
    /// Stable machine-readable kind for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "not_found",
            CoreError::Forbidden(_) => "forbidden",
            CoreError::Validation(_) => "validation_error",
            CoreError::ProfileIncomplete => "profile_incomplete",
            CoreError::AlreadyLiked => "already_liked",
            CoreError::AlreadyDisliked => "already_disliked",
            CoreError::NotMatched => "not_matched",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoreError::Validation(_) | CoreError::ProfileIncomplete => StatusCode::BAD_REQUEST,
            CoreError::AlreadyLiked | CoreError::AlreadyDisliked | CoreError::NotMatched => {
                StatusCode::CONFLICT
            }
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}

impl actix_web::error::ResponseError for CoreError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status().as_u16(),
        })
    }
}
