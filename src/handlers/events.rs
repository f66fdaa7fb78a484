use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::models::{EventFilter, EventPayload, EventQuery};
use crate::services::events;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{Json, Path, Query};
use crate::utils::response::{created, empty_success, success};

pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<Response, AppError> {
    let event = events::create(state.repo.as_ref(), payload).await?;
    Ok(created(event, "Event created"))
}

/// Serves both `/events` and `/events/filter`.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Response, AppError> {
    let filter = EventFilter::from(query);
    let events = events::list(state.repo.as_ref(), &filter).await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = events::get(state.repo.as_ref(), id).await?;
    Ok(success(event, "Event retrieved"))
}

/// PUT and PATCH share merge semantics.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventPayload>,
) -> Result<Response, AppError> {
    let event = events::update(state.repo.as_ref(), id, payload).await?;
    Ok(success(event, "Event updated"))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    events::delete(state.repo.as_ref(), id).await?;
    Ok(empty_success("Event deleted"))
}
