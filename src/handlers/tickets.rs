use axum::extract::State;
use axum::response::Response;
use uuid::Uuid;

use crate::models::TicketPayload;
use crate::services::tickets;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{Json, Path};
use crate::utils::response::{created, empty_success, success};

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<TicketPayload>,
) -> Result<Response, AppError> {
    let ticket = tickets::create(state.repo.as_ref(), payload).await?;
    Ok(created(ticket, "Ticket created"))
}

pub async fn list_tickets(State(state): State<AppState>) -> Result<Response, AppError> {
    let tickets = tickets::list(state.repo.as_ref()).await?;
    Ok(success(tickets, "Tickets retrieved"))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let ticket = tickets::get(state.repo.as_ref(), id).await?;
    Ok(success(ticket, "Ticket retrieved"))
}

pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TicketPayload>,
) -> Result<Response, AppError> {
    let ticket = tickets::update(state.repo.as_ref(), id, payload).await?;
    Ok(success(ticket, "Ticket updated"))
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    tickets::delete(state.repo.as_ref(), id).await?;
    Ok(empty_success("Ticket deleted"))
}
