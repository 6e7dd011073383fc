use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

fn default_response(status: StatusCode, code: ErrorCode) -> Response {
    error_response(status, code.default_message().to_owned(), code)
}

/// Router fallback for unmatched paths.
pub async fn not_found() -> Response {
    default_response(StatusCode::NOT_FOUND, ErrorCode::NotFound)
}

pub async fn method_not_allowed() -> Response {
    default_response(StatusCode::METHOD_NOT_ALLOWED, ErrorCode::MethodNotAllowed)
}
