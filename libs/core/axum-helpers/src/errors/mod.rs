pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// JSON body of every error response produced by this crate.
///
/// ```json
/// { "code": 1001, "error": "INVALID_PATH", "message": "Invalid URL: Cannot parse `abc` to a `i64`" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_owned(),
            message: message.into(),
        }
    }
}

/// Transport and server failures rendered as [`ErrorResponse`].
///
/// Extractor rejections convert via `From`, so custom extractors can use
/// `AppError` as their `Rejection`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    /// The message is logged but never sent to the client
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::JsonExtractorRejection(rejection) => {
                let code = ErrorCode::JsonExtraction;
                tracing::warn!(error_code = code.code(), %rejection, "Rejected request body");
                error_response(rejection.status(), rejection.body_text(), code)
            }
            AppError::PathExtractorRejection(rejection) => {
                let code = ErrorCode::InvalidPath;
                tracing::warn!(error_code = code.code(), %rejection, "Rejected path parameter");
                error_response(StatusCode::BAD_REQUEST, rejection.body_text(), code)
            }
            AppError::InternalServerError(detail) => {
                let code = ErrorCode::InternalError;
                tracing::error!(error_code = code.code(), %detail, "Request failed");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code.default_message().to_owned(),
                    code,
                )
            }
        }
    }
}

pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}
