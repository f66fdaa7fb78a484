use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::models::OrganizerPayload;
use crate::services::organizers;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{Json, Path};
use crate::utils::response::{created, empty_success, success};

pub async fn create_organizer(
    State(state): State<AppState>,
    Json(payload): Json<OrganizerPayload>,
) -> Result<Response, AppError> {
    let organizer = organizers::create(state.repo.as_ref(), payload).await?;
    Ok(created(organizer, "Organizer created"))
}

pub async fn list_organizers(State(state): State<AppState>) -> Result<Response, AppError> {
    let organizers = organizers::list(state.repo.as_ref()).await?;
    Ok(success(organizers, "Organizers retrieved"))
}

pub async fn get_organizer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let organizer = organizers::get(state.repo.as_ref(), id).await?;
    Ok(success(organizer, "Organizer retrieved"))
}

pub async fn update_organizer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrganizerPayload>,
) -> Result<Response, AppError> {
    let organizer = organizers::update(state.repo.as_ref(), id, payload).await?;
    Ok(success(organizer, "Organizer updated"))
}

pub async fn delete_organizer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    organizers::delete(state.repo.as_ref(), id).await?;
    Ok(empty_success("Organizer deleted"))
}
