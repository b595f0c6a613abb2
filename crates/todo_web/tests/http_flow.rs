use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_core::db::open_db_in_memory;
use todo_web::render::LOAD_ERROR_MESSAGE;
use todo_web::{build_router, TaskStore};
use tower::ServiceExt;

fn app() -> Router {
    build_router(TaskStore::open_in_memory().unwrap())
}

fn broken_app() -> Router {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE tasks;").unwrap();
    build_router(TaskStore::new(conn))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn submit(app: &Router, raw_body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/todo")
        .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
        .body(Body::from(raw_body.to_string()))
        .unwrap();
    send(app, request).await
}

fn item_marker(position: usize, description: &str) -> String {
    format!(
        "<span class=\"position\">{position}</span><p class=\"description\">{description}</p>"
    )
}

#[tokio::test]
async fn empty_store_renders_page_without_items() {
    let app = app();

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<ul id=\"todo-list\"></ul>"));
    assert!(!html.contains(LOAD_ERROR_MESSAGE));

    let (status, body) = get(&app, "/api/todo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn submitting_tasks_shows_them_in_creation_order() {
    let app = app();

    let (status, body) = submit(&app, "\"buy milk\"").await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(created["description"], "buy milk");
    assert!(created["id"].is_i64());

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&item_marker(1, "buy milk")));
    assert!(!html.contains("<span class=\"position\">2</span>"));

    let (status, _) = submit(&app, "\"walk dog\"").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, html) = get(&app, "/").await;
    let first = html.find(&item_marker(1, "buy milk")).unwrap();
    let second = html.find(&item_marker(2, "walk dog")).unwrap();
    assert!(first < second);

    let (status, body) = get(&app, "/api/todo").await;
    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<Value> = serde_json::from_str(&body).unwrap();
    let descriptions: Vec<_> = tasks.iter().map(|t| t["description"].clone()).collect();
    assert_eq!(descriptions, vec![json!("buy milk"), json!("walk dog")]);
    assert_ne!(tasks[0]["id"], tasks[1]["id"]);
}

#[tokio::test]
async fn repeated_list_without_create_is_identical() {
    let app = app();
    submit(&app, "\"a\"").await;
    submit(&app, "\"b\"").await;

    let (_, first) = get(&app, "/api/todo").await;
    let (_, second) = get(&app, "/api/todo").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_accepts_json_content_type_too() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/todo")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("\"x\""))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get(&app, "/api/todo").await;
    let tasks: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert!(tasks.iter().any(|t| t["description"] == "x"));
}

#[tokio::test]
async fn non_string_body_is_rejected() {
    let app = app();

    let (status, body) = submit(&app, r#"{"description":"buy milk"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "bad_request");

    let (status, _) = submit(&app, "buy milk").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, "/api/todo").await;
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn blank_description_is_rejected() {
    let app = app();

    let (status, body) = submit(&app, "\"   \"").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "validation_failed");
}

#[tokio::test]
async fn unavailable_store_still_renders_page_with_banner() {
    let app = broken_app();

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains(LOAD_ERROR_MESSAGE));
    assert!(html.contains("<ul id=\"todo-list\"></ul>"));
}

#[tokio::test]
async fn unavailable_store_maps_to_503_on_api() {
    let app = broken_app();

    let (status, body) = get(&app, "/api/todo").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["code"], "store_unavailable");

    let (status, _) = submit(&app, "\"buy milk\"").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn update_and_delete_are_not_routed() {
    let app = app();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/todo")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_task_count_and_last_creation_time() {
    let app = app();

    let (_, body) = get(&app, "/health").await;
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["tasks"], 0);
    assert!(health["last_created_at_ms"].is_null());

    submit(&app, "\"one\"").await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["tasks"], 1);
    assert!(health["last_created_at_ms"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn rows_from_other_writers_are_rendered_as_stored() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO tasks (description) VALUES ('buy milk');
         INSERT INTO tasks (description) VALUES ('');
         INSERT INTO tasks (description) VALUES ('walk dog');",
    )
    .unwrap();
    let app = build_router(TaskStore::new(conn));

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(&item_marker(1, "buy milk")));
    assert!(html.contains(&item_marker(2, "")));
    assert!(html.contains(&item_marker(3, "walk dog")));
    assert!(!html.contains(LOAD_ERROR_MESSAGE));

    let (status, body) = get(&app, "/api/todo").await;
    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[1]["description"], "");
}
