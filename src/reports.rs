//! Read-only views computed across organizers, events and tickets.
//!
//! These are pure functions of the records passed in. The in-memory store
//! feeds them its current collections; the Postgres store computes the same
//! views in SQL.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{Category, CategorySummary, Event, Organizer, Ticket, TicketReportRow};

/// Inner join of every ticket with its event and that event's organizer,
/// newest purchase first. Tickets whose event or organizer is missing are
/// dropped.
pub fn tickets_joined<'a>(
    tickets: impl IntoIterator<Item = &'a Ticket>,
    events: impl IntoIterator<Item = &'a Event>,
    organizers: impl IntoIterator<Item = &'a Organizer>,
) -> Vec<TicketReportRow> {
    let events: HashMap<Uuid, &Event> = events.into_iter().map(|e| (e.id, e)).collect();
    let organizers: HashMap<Uuid, &Organizer> =
        organizers.into_iter().map(|o| (o.id, o)).collect();

    let mut joined: Vec<(&Ticket, TicketReportRow)> = tickets
        .into_iter()
        .filter_map(|ticket| {
            let event = events.get(&ticket.event_id)?;
            let organizer = organizers.get(&event.organizer_id)?;
            Some((
                ticket,
                TicketReportRow {
                    buyer_name: ticket.buyer_name.clone(),
                    seat_number: ticket.seat_number,
                    checked_in: ticket.checked_in,
                    purchase_date: ticket.purchase_date,
                    event_title: event.title.clone(),
                    event_category: event.category,
                    organizer_name: organizer.name.clone(),
                },
            ))
        })
        .collect();

    joined.sort_by(|(a, _), (b, _)| {
        b.purchase_date
            .cmp(&a.purchase_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    joined.into_iter().map(|(_, row)| row).collect()
}

/// Events grouped by category with count and mean price, largest group
/// first. Ties are ordered by category name.
pub fn events_by_category<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<&'static str, (Category, i64, Decimal)> = BTreeMap::new();
    for event in events {
        let entry = groups
            .entry(event.category.as_str())
            .or_insert((event.category, 0, Decimal::ZERO));
        entry.1 += 1;
        entry.2 += event.price;
    }

    let mut summaries: Vec<CategorySummary> = groups
        .into_values()
        .map(|(category, count, total)| CategorySummary {
            category,
            count,
            avg_price: total / Decimal::from(count),
        })
        .collect();

    // stable sort keeps the alphabetical order from the BTreeMap for ties
    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}
