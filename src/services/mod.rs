//! Operations behind the HTTP surface: validate, write, then resolve
//! references for the returned representation.
//!
//! Reference resolution ("populate") is an explicit batch lookup by id. A
//! reference that no longer resolves is embedded as `None`; it never fails
//! the read. Create and update re-read nothing transactionally, so a parent
//! deleted between the write and the lookup simply shows up as `None`.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::models::{Event, Organizer, PopulatedEvent, PopulatedTicket, Ticket};
use crate::store::Repository;
use crate::utils::error::AppError;

pub mod events;
pub mod organizers;
pub mod tickets;

fn unique_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

pub(crate) async fn populate_events(
    repo: &dyn Repository,
    events: Vec<Event>,
) -> Result<Vec<PopulatedEvent>, AppError> {
    let ids = unique_ids(events.iter().map(|e| e.organizer_id));
    let organizers: HashMap<Uuid, Organizer> = repo
        .find_organizers(&ids)
        .await?
        .into_iter()
        .map(|o| (o.id, o))
        .collect();

    Ok(events
        .into_iter()
        .map(|event| {
            let organizer = organizers.get(&event.organizer_id).cloned();
            if organizer.is_none() {
                debug!(event_id = %event.id, organizer_id = %event.organizer_id, "Organizer reference unresolved");
            }
            event.populate(organizer)
        })
        .collect())
}

pub(crate) async fn populate_event(
    repo: &dyn Repository,
    event: Event,
) -> Result<PopulatedEvent, AppError> {
    let mut populated = populate_events(repo, vec![event]).await?;
    populated
        .pop()
        .ok_or_else(|| AppError::InternalServerError("populate returned no event".into()))
}

/// Two-level populate: ticket -> event -> organizer.
pub(crate) async fn populate_tickets(
    repo: &dyn Repository,
    tickets: Vec<Ticket>,
) -> Result<Vec<PopulatedTicket>, AppError> {
    let ids = unique_ids(tickets.iter().map(|t| t.event_id));
    let events = repo.find_events(&ids).await?;
    let events: HashMap<Uuid, PopulatedEvent> = populate_events(repo, events)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    Ok(tickets
        .into_iter()
        .map(|ticket| {
            let event = events.get(&ticket.event_id).cloned();
            if event.is_none() {
                debug!(ticket_id = %ticket.id, event_id = %ticket.event_id, "Event reference unresolved");
            }
            ticket.populate(event)
        })
        .collect())
}

pub(crate) async fn populate_ticket(
    repo: &dyn Repository,
    ticket: Ticket,
) -> Result<PopulatedTicket, AppError> {
    let mut populated = populate_tickets(repo, vec![ticket]).await?;
    populated
        .pop()
        .ok_or_else(|| AppError::InternalServerError("populate returned no ticket".into()))
}
