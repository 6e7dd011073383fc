//! Machine-readable error identifiers.
//!
//! Clients match on the string form; logs and dashboards use the integer.
//! Client errors are numbered from 1001, server errors from 2001.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::InvalidPath.as_str(), "INVALID_PATH");
//! assert_eq!(ErrorCode::InvalidPath.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A path segment did not parse, e.g. a non-numeric product id
    InvalidPath,
    /// Body was not JSON, had the wrong content type, or did not fit the schema
    JsonExtraction,
    /// No route matched
    NotFound,
    MethodNotAllowed,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPath => "INVALID_PATH",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidPath => 1001,
            Self::JsonExtraction => 1002,
            Self::NotFound => 1003,
            Self::MethodNotAllowed => 1004,
            Self::InternalError => 2001,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidPath => "Invalid path parameter",
            Self::JsonExtraction => "Invalid request body",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "Method not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
