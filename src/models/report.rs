use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::event::Category;

/// One row of the joined ticket report: a ticket projected together with its
/// event and that event's organizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketReportRow {
    pub buyer_name: String,
    pub seat_number: i32,
    pub checked_in: bool,
    pub purchase_date: DateTime<Utc>,
    pub event_title: String,
    pub event_category: Category,
    pub organizer_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: Category,
    pub count: i64,
    pub avg_price: Decimal,
}
