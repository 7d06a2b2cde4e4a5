use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use service::errors::ServiceError;

/// JSON error body: `{"error": <title>, "message": <detail>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.error, "message": self.message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_client_error() {
            debug!(err = %e, "request rejected");
        } else {
            error!(err = %e, "storage failure");
        }
        match e {
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            ServiceError::InvalidParent(_) | ServiceError::ImmutableField(_) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(e.to_string()))
            }
            ServiceError::NotFound(_) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string())),
            ServiceError::Conflict(_) => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string())),
            ServiceError::Db(_) => JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string())),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(r.body_text()))
    }
}
