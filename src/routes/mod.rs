use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::services::ServiceError;

pub mod api;

/// Wrap a payload in the `{success, data}` envelope.
pub fn json_success<T: Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "data": data }))
}

/// Error envelope: `{success: false, error}`.
pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "success": false, "error": message }))
}

/// Error envelope with a structured `details` attachment.
pub fn json_error_with_details<T: Serialize>(
    status: StatusCode,
    message: &str,
    details: &T,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "success": false,
        "error": message,
        "details": details,
    }))
}

/// Map service errors onto HTTP responses.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => json_error(
            StatusCode::FORBIDDEN,
            "you do not have access to this resource",
        ),
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not found"),
        ServiceError::Form(message) => json_error(StatusCode::BAD_REQUEST, &message),
        ServiceError::Incompatible(errors) => json_error_with_details(
            StatusCode::BAD_REQUEST,
            "build is incompatible",
            &json!({ "compatibility_errors": errors }),
        ),
        ServiceError::Internal => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
