//! Error codes carried in every [`super::ErrorResponse`].
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
//! assert_eq!(ErrorCode::NotFound.code(), 1004);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error identifiers.
///
/// Integer ranges: 1000s client errors, 2000s database errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    BadRequest,
    /// Connection, query or constraint failure reported by the store
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code used as the `error_code` field in logs
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1006,
            Self::DatabaseError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
