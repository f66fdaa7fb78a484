pub mod event;
pub mod organizer;
pub mod report;
pub mod ticket;
pub mod validators;

pub use event::{Category, Event, EventDraft, EventFilter, EventPayload, EventQuery, PopulatedEvent};
pub use organizer::{Organizer, OrganizerDraft, OrganizerPayload};
pub use report::{CategorySummary, TicketReportRow};
pub use ticket::{PopulatedTicket, Ticket, TicketDraft, TicketPayload};
