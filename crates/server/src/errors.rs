use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"status", "error", "message"?, "details"?}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    code: StatusCode,
    status: u16,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl JsonApiError {
    pub fn new(code: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { code, status: code.as_u16(), error: title.to_string(), message: detail, details: Vec::new() }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.code
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(violations) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some("Validation failed".into())).with_details(violations)
            }
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            other => {
                error!(err = %other, "request failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(other.to_string()))
            }
        }
    }
}

/// Unreadable bodies are a client error regardless of the rejection kind.
impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(r.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(r.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("seed failed: {0}")]
    Seed(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
