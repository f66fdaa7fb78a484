use axum::extract::State;
use axum::response::Response;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn tickets_joined(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = state.repo.tickets_joined().await?;
    Ok(success(rows, "Joined ticket report"))
}

pub async fn events_by_category(State(state): State<AppState>) -> Result<Response, AppError> {
    let summary = state.repo.events_by_category().await?;
    Ok(success(summary, "Events by category report"))
}
