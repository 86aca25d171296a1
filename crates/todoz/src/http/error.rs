//! API error handling.
//!
//! Every failure leaves the server as JSON: `{"code", "message", "details"?}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use todoapp::error::TodoError;
use todoapp::validation::TitleError;
use tokio::task::JoinError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    pub message: String,
    /// Field-level errors for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        let mut error = ApiError::new("VALIDATION_ERROR", message);
        error.details = Some(details);
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TodoError> for ApiErrorResponse {
    fn from(error: TodoError) -> Self {
        match error {
            TodoError::NotFound(id) => Self::not_found(format!("Todo {} not found", id)),
            other => {
                tracing::error!(error = %other, "unexpected core error");
                Self::internal_error("Internal server error")
            }
        }
    }
}

impl From<TitleError> for ApiErrorResponse {
    fn from(error: TitleError) -> Self {
        Self::validation_error(
            "Invalid request body",
            vec![FieldError::new("title", error.to_string())],
        )
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("INVALID_BODY", rejection.body_text())
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("INVALID_ID", rejection.body_text())
    }
}

impl From<JoinError> for ApiErrorResponse {
    fn from(error: JoinError) -> Self {
        tracing::error!(error = %error, "repository task failed");
        Self::internal_error("Internal server error")
    }
}
