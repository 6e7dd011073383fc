//! OpenAPI response components shared by domain routers.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Unexpected server-side failure",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Request body is not valid JSON or does not match the schema",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "JSON_EXTRACTION",
        "message": "Failed to parse the request body as JSON"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Product id in the path is not an integer",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "INVALID_PATH",
        "message": "Invalid URL: Cannot parse `abc` to a `i64`"
    })
)]
pub struct BadRequestPathResponse(pub ErrorResponse);
