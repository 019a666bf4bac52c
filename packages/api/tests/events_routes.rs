#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use store::{MemoryStore, Operation, StoreCall};
use tower::ServiceExt;

fn request(method: Method, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(store: &MemoryStore, request: Request<Body>) -> (StatusCode, Value) {
    let response = api::events::router(store.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn lists_events_in_date_order() {
    let store = MemoryStore::new();
    store
        .seed_event(json!({"title": "Founder meetup", "date": "2025-09-12"}))
        .unwrap();
    store
        .seed_event(json!({"title": "Pitch practice", "date": "2025-03-01"}))
        .unwrap();

    let (status, body) = send(&store, request(Method::GET, "/api/events", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Pitch practice");
    assert_eq!(body[1]["title"], "Founder meetup");
    assert_eq!(body[1]["id"], 1);
    assert_eq!(store.calls(), [StoreCall::ListEvents]);
}

#[tokio::test]
async fn creates_event_from_body() {
    let store = MemoryStore::new();
    let row = json!({"title": "Demo day", "date": "2025-04-04", "location": "Bengaluru"});

    let (status, body) = send(
        &store,
        request(Method::POST, "/api/events", Some(&row.to_string())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Demo day");
    assert_eq!(body["location"], "Bengaluru");
    assert_eq!(store.calls(), [StoreCall::CreateEvent(row)]);
    assert_eq!(store.events().len(), 1);
}

#[tokio::test]
async fn accepts_json_body_sent_as_plain_text() {
    let store = MemoryStore::new();
    let row = json!({"title": "Demo day", "date": "2025-04-04"});
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/events")
        .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
        .body(Body::from(row.to_string()))
        .unwrap();

    let (status, body) = send(&store, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Demo day");
    assert_eq!(store.calls(), [StoreCall::CreateEvent(row)]);
}

#[tokio::test]
async fn accepts_update_body_without_content_type() {
    let store = MemoryStore::new();
    store
        .seed_event(json!({"title": "Hack night", "date": "2025-06-06"}))
        .unwrap();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/events/1")
        .body(Body::from(r#"{"location": "Pune"}"#))
        .unwrap();

    let (status, body) = send(&store, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Pune");
}

#[tokio::test]
async fn fetches_single_event() {
    let store = MemoryStore::new();
    store
        .seed_event(json!({"title": "Office hours", "date": "2025-05-20"}))
        .unwrap();

    let (status, body) = send(&store, request(Method::GET, "/api/events/1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Office hours");
    assert_eq!(store.calls(), [StoreCall::GetEvent("1".into())]);
}

#[tokio::test]
async fn missing_event_reports_backend_message() {
    let store = MemoryStore::new();

    let (status, body) = send(&store, request(Method::GET, "/api/events/404", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "JSON object requested, multiple (or no) rows returned"})
    );
}

#[tokio::test]
async fn updates_event_columns() {
    let store = MemoryStore::new();
    store
        .seed_event(json!({"title": "Hack night", "date": "2025-06-06"}))
        .unwrap();

    let (status, body) = send(
        &store,
        request(Method::PUT, "/api/events/1", Some(r#"{"location": "Pune"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hack night");
    assert_eq!(body["location"], "Pune");
    assert_eq!(
        store.calls(),
        [StoreCall::UpdateEvent("1".into(), json!({"location": "Pune"}))]
    );
}

#[tokio::test]
async fn update_without_matching_row_returns_null() {
    let store = MemoryStore::new();

    let (status, body) = send(
        &store,
        request(Method::PUT, "/api/events/9", Some(r#"{"title": "ghost"}"#)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn deletes_event() {
    let store = MemoryStore::new();
    store
        .seed_event(json!({"title": "Retired", "date": "2024-01-01"}))
        .unwrap();

    let (status, body) = send(&store, request(Method::DELETE, "/api/events/1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert!(store.events().is_empty());

    // Deleting again still succeeds.
    let (status, _) = send(&store, request(Method::DELETE, "/api/events/1", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn backend_failure_becomes_500() {
    let store = MemoryStore::new();
    store.fail(Operation::ListEvents, "relation \"events\" does not exist");

    let (status, body) = send(&store, request(Method::GET, "/api/events", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "relation \"events\" does not exist"}));
}

#[tokio::test]
async fn malformed_body_is_rejected_before_the_store() {
    let store = MemoryStore::new();

    let (status, body) = send(
        &store,
        request(Method::POST, "/api/events", Some("{not json")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(store.calls().is_empty());
}
