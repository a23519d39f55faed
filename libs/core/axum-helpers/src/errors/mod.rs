pub mod codes;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Task 0193... not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer code for logs and dashboards
    pub code: i32,
    /// Machine-readable identifier, see [`ErrorCode`]
    pub error: String,
    pub message: String,
    /// Field-level validation errors, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error type shared by all HTTP handlers and extractors.
///
/// Domain errors convert into it; [`IntoResponse`] logs it with its
/// `error_code` and renders an [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
            AppError::JsonExtractorRejection(e) => (e.status(), ErrorCode::JsonExtraction),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationError),
            AppError::UuidError(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidUuid),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        }
    }
}

/// Field errors keyed by field name, as rendered under `details`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(fields)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = ?self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        // Internal details stay in the logs.
        let body = match self {
            AppError::Database(_) | AppError::UuidError(_) => {
                ErrorResponse::new(code, code.default_message())
            }
            AppError::JsonExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::ValidationError(e) => {
                ErrorResponse::new(code, code.default_message()).with_details(validation_details(&e))
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => ErrorResponse::new(code, msg),
        };

        (status, Json(body)).into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            ErrorCode::NotFound,
            "The requested resource was not found",
        )),
    )
        .into_response()
}
