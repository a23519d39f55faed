use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use strum::Display;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Kind of record a [`TaskError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    Task,
    Person,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: Resource, id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl TaskError {
    pub fn task_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: Resource::Task,
            id,
        }
    }

    pub fn person_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: Resource::Person,
            id,
        }
    }
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound { resource, id } => {
                AppError::NotFound(format!("{} {} not found", resource, id))
            }
            TaskError::Validation(errors) => AppError::ValidationError(errors),
            TaskError::MissingField(field) => {
                AppError::BadRequest(format!("{} is required", field))
            }
            TaskError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
