use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Single UUID path parameter.
///
/// Rejects malformed ids with `400 INVALID_UUID` instead of axum's plain-text
/// rejection.
///
/// ```ignore
/// async fn get_task(UuidPath(id): UuidPath) -> String {
///     format!("task {id}")
/// }
///
/// let app = Router::new().route("/tasks/{id}", get(get_task));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw)
            .map(UuidPath)
            .map_err(|e| AppError::from(e).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/{id}",
            get(|UuidPath(id): UuidPath| async move { id.to_string() }),
        )
    }

    #[tokio::test]
    async fn test_valid_uuid_is_extracted() {
        let id = Uuid::now_v7();
        let response = app()
            .oneshot(Request::builder().uri(format!("/{}", id)).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/not-a-uuid").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
