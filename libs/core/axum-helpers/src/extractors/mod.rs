//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError) so that
//! malformed input produces the standard JSON error body.

pub mod id_path;
pub mod json;

pub use id_path::IdPath;
pub use json::AppJson;
