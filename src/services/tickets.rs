use tracing::info;
use uuid::Uuid;

use super::{populate_ticket, populate_tickets};
use crate::models::{PopulatedTicket, TicketPayload};
use crate::store::Repository;
use crate::utils::error::AppError;

const RESOURCE: &str = "Ticket";

// TODO: decide whether (eventId, seatNumber) should be unique; duplicate seats are accepted today.
pub async fn create(repo: &dyn Repository, payload: TicketPayload) -> Result<PopulatedTicket, AppError> {
    let draft = payload.into_draft()?;
    let ticket = repo.insert_ticket(draft).await?;
    info!(ticket_id = %ticket.id, event_id = %ticket.event_id, "Ticket created");
    populate_ticket(repo, ticket).await
}

pub async fn list(repo: &dyn Repository) -> Result<Vec<PopulatedTicket>, AppError> {
    let tickets = repo.list_tickets().await?;
    populate_tickets(repo, tickets).await
}

pub async fn get(repo: &dyn Repository, id: Uuid) -> Result<PopulatedTicket, AppError> {
    let ticket = repo
        .find_ticket(id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    populate_ticket(repo, ticket).await
}

pub async fn update(
    repo: &dyn Repository,
    id: Uuid,
    payload: TicketPayload,
) -> Result<PopulatedTicket, AppError> {
    let current = repo
        .find_ticket(id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    let draft = payload.merge_into(&current)?;
    let ticket = repo
        .update_ticket(id, draft)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    info!(ticket_id = %ticket.id, "Ticket updated");
    populate_ticket(repo, ticket).await
}

pub async fn delete(repo: &dyn Repository, id: Uuid) -> Result<(), AppError> {
    if !repo.delete_ticket(id).await? {
        return Err(AppError::not_found(RESOURCE));
    }
    info!(ticket_id = %id, "Ticket deleted");
    Ok(())
}
