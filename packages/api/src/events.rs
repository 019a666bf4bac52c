//! # Events REST router
//!
//! Thin JSON pass-through over the `events` table:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | `GET` | `/api/events` | every event, ordered by date |
//! | `POST` | `/api/events` | the created event, or `null` |
//! | `GET` | `/api/events/{id}` | one event |
//! | `PUT` | `/api/events/{id}` | the updated event, or `null` |
//! | `DELETE` | `/api/events/{id}` | `{"success": true}` |
//!
//! Bodies are parsed as JSON whatever their `Content-Type` and forwarded
//! as-is; a body that is not JSON gets `400`. Any backend failure becomes
//! `500 {"error": "<message>"}` (see [`ApiError`]).

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{Event, EventStore};

use crate::error::ApiError;

/// Build the router over `store`.
pub fn router<S>(store: S) -> Router
where
    S: EventStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/events", get(list::<S>).post(create::<S>))
        .route(
            "/api/events/{id}",
            get(fetch::<S>).put(update::<S>).delete(remove::<S>),
        )
        .with_state(store)
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

async fn list<S: EventStore>(State(store): State<S>) -> Result<Json<Vec<Event>>, ApiError> {
    tracing::debug!("Listing events");
    Ok(Json(store.list_events().await?))
}

async fn create<S: EventStore>(
    State(store): State<S>,
    body: Bytes,
) -> Result<Json<Option<Event>>, ApiError> {
    let row = parse_body(&body)?;
    tracing::debug!("Creating event");
    Ok(Json(store.create_event(row).await?))
}

async fn fetch<S: EventStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    tracing::debug!("Fetching event {}", id);
    Ok(Json(store.get_event(&id).await?))
}

async fn update<S: EventStore>(
    State(store): State<S>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Option<Event>>, ApiError> {
    let changes = parse_body(&body)?;
    tracing::debug!("Updating event {}", id);
    Ok(Json(store.update_event(&id, changes).await?))
}

async fn remove<S: EventStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!("Deleting event {}", id);
    store.delete_event(&id).await?;
    Ok(Json(json!({ "success": true })))
}
