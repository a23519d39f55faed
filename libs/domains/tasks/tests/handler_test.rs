//! Handler tests for the Tasks domain
//!
//! These drive the tasks router directly (no `/api` prefix, no CORS) to check
//! JSON shapes, status codes and error bodies against a real database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(db: &TestDatabase) -> Router {
    handlers::router(TaskService::new(
        PgTaskRepository::new(db.connection()),
        PgPersonRepository::new(db.connection()),
    ))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, title: &str, deadline: &str, person_id: Uuid) -> TaskView {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "title": title,
                "deadline": deadline,
                "done": false,
                "person": { "id": person_id }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_task_handler_returns_201() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let name = builder.name("person", "owner");
    let person_id = db.create_test_person(builder.person_id(), &name).await;
    let app = app(&db);

    let view = create(&app, "Ship report", "2024-05-01", person_id).await;

    assert_eq!(view.title, "Ship report");
    assert_eq!(view.description, "");
    assert_eq!(
        view.person,
        Some(PersonView {
            id: person_id,
            name
        })
    );
}

#[tokio::test]
async fn test_create_task_handler_validates_title() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_validate");
    let person_id = db
        .create_test_person(builder.person_id(), &builder.name("person", "owner"))
        .await;

    let response = app(&db)
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "", "deadline": "2024-05-01", "person": { "id": person_id } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_task_handler_unknown_person_is_404() {
    let db = TestDatabase::new().await;

    let response = app(&db)
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "Orphan", "deadline": "2024-05-01", "person": { "id": Uuid::now_v7() } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert!(body.message.starts_with("Person"));
}

#[tokio::test]
async fn test_create_task_handler_without_person_is_400() {
    let db = TestDatabase::new().await;

    let response = app(&db)
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "Loose", "deadline": "2024-05-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_task_handler() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_get");
    let person_id = db
        .create_test_person(builder.person_id(), &builder.name("person", "owner"))
        .await;
    let app = app(&db);
    let created = create(&app, "Read me", "2024-05-01", person_id).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found: TaskView = json_body(response.into_body()).await;
    assert_eq!(found, created);

    let missing = app
        .clone()
        .oneshot(get(&format!("/{}", Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = app.oneshot(get("/not-a-uuid")).await.unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = json_body(invalid.into_body()).await;
    assert_eq!(body.error, "INVALID_UUID");
}

#[tokio::test]
async fn test_update_task_handler_uses_path_id() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_update");
    let person_id = db
        .create_test_person(builder.person_id(), &builder.name("person", "owner"))
        .await;
    let app = app(&db);
    let created = create(&app, "Draft", "2024-05-01", person_id).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({
                "id": Uuid::now_v7(),
                "title": "Final",
                "description": "done and dusted",
                "deadline": "2024-06-01",
                "done": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    let found: TaskView = json_body(response.into_body()).await;
    assert_eq!(found.title, "Final");
    assert!(found.done);
    assert_eq!(found.person, created.person);
}

#[tokio::test]
async fn test_update_unknown_task_is_404() {
    let db = TestDatabase::new().await;

    let response = app(&db)
        .oneshot(json_request(
            "PUT",
            &format!("/{}", Uuid::now_v7()),
            json!({ "title": "Ghost", "deadline": "2024-05-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_task_handler_is_idempotent() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_delete");
    let person_id = db
        .create_test_person(builder.person_id(), &builder.name("person", "owner"))
        .await;
    let app = app(&db);
    let created = create(&app, "Temp", "2024-05-01", person_id).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_query_handlers() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("handler_queries");
    let person_id = db
        .create_test_person(builder.person_id(), &builder.name("person", "owner"))
        .await;
    let app = app(&db);

    create(&app, "early", "2020-01-01", person_id).await;
    create(&app, "mid", "2024-05-15", person_id).await;
    create(&app, "far", "2999-01-01", person_id).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/person/{}", person_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let owned: Vec<TaskView> = json_body(response.into_body()).await;
    assert_eq!(owned.len(), 3);

    let response = app
        .clone()
        .oneshot(get("/deadline?start=2024-05-01&end=2024-05-31"))
        .await
        .unwrap();
    let window: Vec<TaskView> = json_body(response.into_body()).await;
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].title, "mid");

    let response = app.clone().oneshot(get("/overdue")).await.unwrap();
    let overdue: Vec<TaskView> = json_body(response.into_body()).await;
    assert_eq!(overdue.len(), 2);

    let response = app.clone().oneshot(get("/unassigned")).await.unwrap();
    let unassigned: Vec<TaskView> = json_body(response.into_body()).await;
    assert!(unassigned.is_empty());

    let response = app.oneshot(get("/deadline?start=yesterday")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
