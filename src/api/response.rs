use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::domain::order::{OrderError, StorageError};

// ============================================================================
// Response Envelope & Error Mapping
// ============================================================================

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data: Some(data),
            count: None,
            error: None,
        }
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    pub fn list(message: &str, data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            message: message.to_string(),
            data: Some(data),
            count: Some(count),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &str) -> Self {
        Self {
            message: message.to_string(),
            data: None,
            count: None,
            error: None,
        }
    }

    pub fn failure(message: &str, error: String) -> Self {
        Self {
            message: message.to_string(),
            data: None,
            count: None,
            error: Some(error),
        }
    }
}

/// Service error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub OrderError);

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ApiError {
    fn message(&self) -> &'static str {
        match &self.0 {
            OrderError::Validation(_) => "Invalid order",
            OrderError::NotFound(_) => "Order not found",
            OrderError::Conflict(_) => "Order already exists",
            OrderError::Storage(_) => "Storage failure",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::Conflict(_) => StatusCode::CONFLICT,
            OrderError::Storage(StorageError::TimedOut) => StatusCode::SERVICE_UNAVAILABLE,
            OrderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(Envelope::failure(self.message(), self.0.to_string()))
    }
}

/// Metrics label for the outcome of a service call.
pub fn outcome(err: &OrderError) -> &'static str {
    match err {
        OrderError::Validation(_) => "validation",
        OrderError::NotFound(_) => "not_found",
        OrderError::Conflict(_) => "conflict",
        OrderError::Storage(_) => "storage",
    }
}

/// Malformed bodies (bad JSON, unknown status labels) answer 400 in the
/// same envelope as service errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        tracing::warn!(error = %err, "Rejected malformed request body");
        let response =
            HttpResponse::BadRequest().json(Envelope::failure("Error parsing request", err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}
