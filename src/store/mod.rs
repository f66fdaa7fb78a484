//! Persistence for the three record collections.
//!
//! Two implementations are provided:
//!
//! - [`PgStore`] (production): one table per collection in Postgres, reports
//!   computed with SQL joins and aggregates
//! - [`MemoryStore`] (development and tests): one `HashMap` per collection,
//!   reports computed by [`crate::reports`]
//!
//! References between collections are plain ids. Nothing here checks that a
//! referenced record exists and nothing cascades on delete; resolving
//! references is the caller's job (see [`crate::services`]).

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    CategorySummary, Event, EventDraft, EventFilter, Organizer, OrganizerDraft, Ticket,
    TicketDraft, TicketReportRow,
};
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait OrganizerRepository: Send + Sync {
    async fn insert_organizer(&self, draft: OrganizerDraft) -> Result<Organizer, AppError>;

    /// Most recently created first.
    async fn list_organizers(&self) -> Result<Vec<Organizer>, AppError>;

    async fn find_organizer(&self, id: Uuid) -> Result<Option<Organizer>, AppError>;

    /// Batch lookup; ids that do not resolve are simply absent from the result.
    async fn find_organizers(&self, ids: &[Uuid]) -> Result<Vec<Organizer>, AppError>;

    async fn update_organizer(
        &self,
        id: Uuid,
        draft: OrganizerDraft,
    ) -> Result<Option<Organizer>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_organizer(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert_event(&self, draft: EventDraft) -> Result<Event, AppError>;

    /// Matching events ordered by start date, earliest first.
    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError>;

    async fn find_events(&self, ids: &[Uuid]) -> Result<Vec<Event>, AppError>;

    async fn update_event(&self, id: Uuid, draft: EventDraft) -> Result<Option<Event>, AppError>;

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn insert_ticket(&self, draft: TicketDraft) -> Result<Ticket, AppError>;

    /// Most recently created first.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, AppError>;

    async fn find_ticket(&self, id: Uuid) -> Result<Option<Ticket>, AppError>;

    async fn update_ticket(&self, id: Uuid, draft: TicketDraft)
        -> Result<Option<Ticket>, AppError>;

    async fn delete_ticket(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Read-only views recomputed from current state on every call.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn tickets_joined(&self) -> Result<Vec<TicketReportRow>, AppError>;

    async fn events_by_category(&self) -> Result<Vec<CategorySummary>, AppError>;
}

pub trait Repository:
    OrganizerRepository + EventRepository + TicketRepository + ReportRepository
{
}

impl<T> Repository for T where
    T: OrganizerRepository + EventRepository + TicketRepository + ReportRepository
{
}
