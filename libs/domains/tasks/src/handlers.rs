use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{DeadlineRange, PersonRef, PersonView, TaskForm, TaskView};
use crate::repository::{PersonRepository, TaskRepository};
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_task,
        get_task,
        update_task,
        delete_task,
        tasks_by_person,
        tasks_by_deadline,
        unassigned_tasks,
        overdue_tasks,
    ),
    components(
        schemas(TaskForm, TaskView, PersonRef, PersonView),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "tasks", description = "Todo task management")
    )
)]
pub struct ApiDoc;

/// Task routes, to be nested under `/tasks`.
pub fn router<T, P>(service: TaskService<T, P>) -> Router
where
    T: TaskRepository + 'static,
    P: PersonRepository + 'static,
{
    Router::new()
        .route("/", post(create_task))
        .route("/unassigned", get(unassigned_tasks))
        .route("/overdue", get(overdue_tasks))
        .route("/deadline", get(tasks_by_deadline))
        .route("/person/{person_id}", get(tasks_by_person))
        .route(
            "/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(Arc::new(service))
}

/// Create a task for an existing person
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = TaskForm,
    responses(
        (status = 201, description = "Task created", body = TaskView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_task<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    ValidatedJson(form): ValidatedJson<TaskForm>,
) -> TaskResult<impl IntoResponse> {
    let view = service.create(form).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_task<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<Json<TaskView>> {
    Ok(Json(service.find_by_id(id).await?))
}

/// Replace title, description, deadline and done of a task.
///
/// The id in the path wins over any id in the body.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    request_body = TaskForm,
    responses(
        (status = 204, description = "Task updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_task<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(mut form): ValidatedJson<TaskForm>,
) -> TaskResult<StatusCode> {
    form.id = Some(id);
    service.update(form).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a task. Unknown ids are accepted.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_task<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    UuidPath(id): UuidPath,
) -> TaskResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Tasks owned by a person
#[utoipa::path(
    get,
    path = "/person/{person_id}",
    tag = "tasks",
    params(
        ("person_id" = Uuid, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Tasks owned by the person", body = Vec<TaskView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn tasks_by_person<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    UuidPath(person_id): UuidPath,
) -> TaskResult<Json<Vec<TaskView>>> {
    Ok(Json(service.find_tasks_by_person_id(person_id).await?))
}

/// Tasks due within an inclusive date window
#[utoipa::path(
    get,
    path = "/deadline",
    tag = "tasks",
    params(DeadlineRange),
    responses(
        (status = 200, description = "Tasks due in the window", body = Vec<TaskView>),
        (status = 400, description = "Missing or malformed dates"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn tasks_by_deadline<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
    Query(range): Query<DeadlineRange>,
) -> TaskResult<Json<Vec<TaskView>>> {
    let views = service
        .find_tasks_between_start_and_end_date(range.start, range.end)
        .await?;
    Ok(Json(views))
}

/// Tasks without an owner
#[utoipa::path(
    get,
    path = "/unassigned",
    tag = "tasks",
    responses(
        (status = 200, description = "Unassigned tasks", body = Vec<TaskView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unassigned_tasks<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
) -> TaskResult<Json<Vec<TaskView>>> {
    Ok(Json(service.find_all_unassigned_todo_items().await?))
}

/// Unfinished tasks past their deadline
#[utoipa::path(
    get,
    path = "/overdue",
    tag = "tasks",
    responses(
        (status = 200, description = "Overdue tasks", body = Vec<TaskView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn overdue_tasks<T: TaskRepository, P: PersonRepository>(
    State(service): State<Arc<TaskService<T, P>>>,
) -> TaskResult<Json<Vec<TaskView>>> {
    Ok(Json(service.find_all_unfinished_and_overdue().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryPersonRepository, InMemoryTaskRepository};
    use crate::models::Person;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn app(people: Vec<Person>) -> Router {
        router(TaskService::new(
            InMemoryTaskRepository::new(),
            InMemoryPersonRepository::with_people(people),
        ))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_201_with_person() {
        let ada = Person::new(Uuid::now_v7(), "Ada");
        let response = app(vec![ada.clone()])
            .oneshot(post_json(
                "/",
                json!({"title": "Ship report", "deadline": "2024-05-01", "person": {"id": ada.id}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let view: TaskView = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(view.person.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_static_routes_win_over_id() {
        let response = app(vec![])
            .oneshot(
                Request::builder()
                    .uri("/unassigned")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_person_is_404() {
        let response = app(vec![])
            .oneshot(post_json(
                "/",
                json!({"title": "Ship report", "deadline": "2024-05-01", "person": {"id": Uuid::now_v7()}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
