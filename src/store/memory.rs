use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EventRepository, OrganizerRepository, ReportRepository, TicketRepository};
use crate::models::{
    CategorySummary, Event, EventDraft, EventFilter, Organizer, OrganizerDraft, Ticket,
    TicketDraft, TicketReportRow,
};
use crate::reports;
use crate::utils::error::AppError;

/// In-memory store for running without Postgres and for fast, deterministic
/// tests. Every write touches a single collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    organizers: RwLock<HashMap<Uuid, Organizer>>,
    events: RwLock<HashMap<Uuid, Event>>,
    tickets: RwLock<HashMap<Uuid, Ticket>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrganizerRepository for MemoryStore {
    async fn insert_organizer(&self, draft: OrganizerDraft) -> Result<Organizer, AppError> {
        let now = Utc::now();
        let organizer = Organizer {
            id: Uuid::new_v4(),
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            created_at: now,
            updated_at: now,
        };
        self.organizers
            .write()
            .await
            .insert(organizer.id, organizer.clone());
        Ok(organizer)
    }

    async fn list_organizers(&self) -> Result<Vec<Organizer>, AppError> {
        let mut organizers: Vec<Organizer> =
            self.organizers.read().await.values().cloned().collect();
        organizers.sort_by_key(|o| (Reverse(o.created_at), o.id));
        Ok(organizers)
    }

    async fn find_organizer(&self, id: Uuid) -> Result<Option<Organizer>, AppError> {
        Ok(self.organizers.read().await.get(&id).cloned())
    }

    async fn find_organizers(&self, ids: &[Uuid]) -> Result<Vec<Organizer>, AppError> {
        let organizers = self.organizers.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| organizers.get(id).cloned())
            .collect())
    }

    async fn update_organizer(
        &self,
        id: Uuid,
        draft: OrganizerDraft,
    ) -> Result<Option<Organizer>, AppError> {
        let mut organizers = self.organizers.write().await;
        let Some(organizer) = organizers.get_mut(&id) else {
            return Ok(None);
        };
        organizer.name = draft.name;
        organizer.phone = draft.phone;
        organizer.email = draft.email;
        organizer.updated_at = Utc::now();
        Ok(Some(organizer.clone()))
    }

    async fn delete_organizer(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.organizers.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn insert_event(&self, draft: EventDraft) -> Result<Event, AppError> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: draft.title,
            category: draft.category,
            max_attendees: draft.max_attendees,
            start_date: draft.start_date,
            is_public: draft.is_public,
            tags: draft.tags,
            extra: draft.extra,
            organizer_id: draft.organizer_id,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.start_date, e.id));
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn find_events(&self, ids: &[Uuid]) -> Result<Vec<Event>, AppError> {
        let events = self.events.read().await;
        Ok(ids.iter().filter_map(|id| events.get(id).cloned()).collect())
    }

    async fn update_event(&self, id: Uuid, draft: EventDraft) -> Result<Option<Event>, AppError> {
        let mut events = self.events.write().await;
        let Some(event) = events.get_mut(&id) else {
            return Ok(None);
        };
        event.title = draft.title;
        event.category = draft.category;
        event.max_attendees = draft.max_attendees;
        event.start_date = draft.start_date;
        event.is_public = draft.is_public;
        event.tags = draft.tags;
        event.extra = draft.extra;
        event.organizer_id = draft.organizer_id;
        event.price = draft.price;
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.events.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn insert_ticket(&self, draft: TicketDraft) -> Result<Ticket, AppError> {
        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            buyer_name: draft.buyer_name,
            seat_number: draft.seat_number,
            checked_in: draft.checked_in,
            purchase_date: draft.purchase_date,
            notes: draft.notes,
            payload: draft.payload,
            event_id: draft.event_id,
            created_at: now,
            updated_at: now,
        };
        self.tickets.write().await.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let mut tickets: Vec<Ticket> = self.tickets.read().await.values().cloned().collect();
        tickets.sort_by_key(|t| (Reverse(t.created_at), t.id));
        Ok(tickets)
    }

    async fn find_ticket(&self, id: Uuid) -> Result<Option<Ticket>, AppError> {
        Ok(self.tickets.read().await.get(&id).cloned())
    }

    async fn update_ticket(
        &self,
        id: Uuid,
        draft: TicketDraft,
    ) -> Result<Option<Ticket>, AppError> {
        let mut tickets = self.tickets.write().await;
        let Some(ticket) = tickets.get_mut(&id) else {
            return Ok(None);
        };
        ticket.buyer_name = draft.buyer_name;
        ticket.seat_number = draft.seat_number;
        ticket.checked_in = draft.checked_in;
        ticket.purchase_date = draft.purchase_date;
        ticket.notes = draft.notes;
        ticket.payload = draft.payload;
        ticket.event_id = draft.event_id;
        ticket.updated_at = Utc::now();
        Ok(Some(ticket.clone()))
    }

    async fn delete_ticket(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tickets.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn tickets_joined(&self) -> Result<Vec<TicketReportRow>, AppError> {
        let tickets = self.tickets.read().await;
        let events = self.events.read().await;
        let organizers = self.organizers.read().await;
        Ok(reports::tickets_joined(
            tickets.values(),
            events.values(),
            organizers.values(),
        ))
    }

    async fn events_by_category(&self) -> Result<Vec<CategorySummary>, AppError> {
        Ok(reports::events_by_category(self.events.read().await.values()))
    }
}
