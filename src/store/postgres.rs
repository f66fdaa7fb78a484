use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EventRepository, OrganizerRepository, ReportRepository, TicketRepository};
use crate::models::{
    CategorySummary, Event, EventDraft, EventFilter, Organizer, OrganizerDraft, Ticket,
    TicketDraft, TicketReportRow,
};
use crate::utils::error::AppError;

const ORGANIZER_COLUMNS: &str = "id, name, phone, email, created_at, updated_at";

const EVENT_COLUMNS: &str = "id, title, category, max_attendees, start_date, is_public, tags, \
     extra, organizer_id, price, created_at, updated_at";

const TICKET_COLUMNS: &str = "id, buyer_name, seat_number, checked_in, purchase_date, notes, \
     payload, event_id, created_at, updated_at";

/// Postgres-backed store. Each operation is a single statement; there are
/// no multi-statement transactions.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrganizerRepository for PgStore {
    async fn insert_organizer(&self, draft: OrganizerDraft) -> Result<Organizer, AppError> {
        let sql = format!(
            "INSERT INTO organizers (id, name, phone, email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {ORGANIZER_COLUMNS}"
        );
        let organizer = sqlx::query_as::<_, Organizer>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.name)
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(organizer)
    }

    async fn list_organizers(&self) -> Result<Vec<Organizer>, AppError> {
        let sql = format!(
            "SELECT {ORGANIZER_COLUMNS} FROM organizers ORDER BY created_at DESC, id ASC"
        );
        let organizers = sqlx::query_as::<_, Organizer>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(organizers)
    }

    async fn find_organizer(&self, id: Uuid) -> Result<Option<Organizer>, AppError> {
        let sql = format!("SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE id = $1");
        let organizer = sqlx::query_as::<_, Organizer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(organizer)
    }

    async fn find_organizers(&self, ids: &[Uuid]) -> Result<Vec<Organizer>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE id = ANY($1)");
        let organizers = sqlx::query_as::<_, Organizer>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(organizers)
    }

    async fn update_organizer(
        &self,
        id: Uuid,
        draft: OrganizerDraft,
    ) -> Result<Option<Organizer>, AppError> {
        let sql = format!(
            "UPDATE organizers SET name = $2, phone = $3, email = $4, updated_at = $5
             WHERE id = $1
             RETURNING {ORGANIZER_COLUMNS}"
        );
        let organizer = sqlx::query_as::<_, Organizer>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(organizer)
    }

    async fn delete_organizer(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM organizers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EventRepository for PgStore {
    async fn insert_event(&self, draft: EventDraft) -> Result<Event, AppError> {
        let sql = format!(
            "INSERT INTO events (id, title, category, max_attendees, start_date, is_public,
                                 tags, extra, organizer_id, price, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.title)
            .bind(draft.category)
            .bind(draft.max_attendees)
            .bind(draft.start_date)
            .bind(draft.is_public)
            .bind(&draft.tags)
            .bind(&draft.extra)
            .bind(draft.organizer_id)
            .bind(draft.price)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(event)
    }

    async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE ($1::text IS NULL OR category::text = $1)
               AND ($2::boolean IS NULL OR is_public = $2)
             ORDER BY start_date ASC, id ASC"
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.is_public)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn find_event(&self, id: Uuid) -> Result<Option<Event>, AppError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn find_events(&self, ids: &[Uuid]) -> Result<Vec<Event>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ANY($1)");
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn update_event(&self, id: Uuid, draft: EventDraft) -> Result<Option<Event>, AppError> {
        let sql = format!(
            "UPDATE events SET title = $2, category = $3, max_attendees = $4, start_date = $5,
                    is_public = $6, tags = $7, extra = $8, organizer_id = $9, price = $10,
                    updated_at = $11
             WHERE id = $1
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .bind(&draft.title)
            .bind(draft.category)
            .bind(draft.max_attendees)
            .bind(draft.start_date)
            .bind(draft.is_public)
            .bind(&draft.tags)
            .bind(&draft.extra)
            .bind(draft.organizer_id)
            .bind(draft.price)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TicketRepository for PgStore {
    async fn insert_ticket(&self, draft: TicketDraft) -> Result<Ticket, AppError> {
        let sql = format!(
            "INSERT INTO tickets (id, buyer_name, seat_number, checked_in, purchase_date, notes,
                                  payload, event_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING {TICKET_COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.buyer_name)
            .bind(draft.seat_number)
            .bind(draft.checked_in)
            .bind(draft.purchase_date)
            .bind(&draft.notes)
            .bind(&draft.payload)
            .bind(draft.event_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let sql =
            format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY created_at DESC, id ASC");
        let tickets = sqlx::query_as::<_, Ticket>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    async fn find_ticket(&self, id: Uuid) -> Result<Option<Ticket>, AppError> {
        let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1");
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn update_ticket(
        &self,
        id: Uuid,
        draft: TicketDraft,
    ) -> Result<Option<Ticket>, AppError> {
        let sql = format!(
            "UPDATE tickets SET buyer_name = $2, seat_number = $3, checked_in = $4,
                    purchase_date = $5, notes = $6, payload = $7, event_id = $8, updated_at = $9
             WHERE id = $1
             RETURNING {TICKET_COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, Ticket>(&sql)
            .bind(id)
            .bind(&draft.buyer_name)
            .bind(draft.seat_number)
            .bind(draft.checked_in)
            .bind(draft.purchase_date)
            .bind(&draft.notes)
            .bind(&draft.payload)
            .bind(draft.event_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReportRepository for PgStore {
    async fn tickets_joined(&self) -> Result<Vec<TicketReportRow>, AppError> {
        let rows = sqlx::query_as::<_, TicketReportRow>(
            "SELECT t.buyer_name, t.seat_number, t.checked_in, t.purchase_date,
                    e.title AS event_title, e.category AS event_category,
                    o.name AS organizer_name
             FROM tickets t
             JOIN events e ON e.id = t.event_id
             JOIN organizers o ON o.id = e.organizer_id
             ORDER BY t.purchase_date DESC, t.id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn events_by_category(&self) -> Result<Vec<CategorySummary>, AppError> {
        let rows = sqlx::query_as::<_, CategorySummary>(
            "SELECT category, COUNT(*) AS count, AVG(price) AS avg_price
             FROM events
             GROUP BY category
             ORDER BY count DESC, category::text ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
