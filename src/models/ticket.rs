use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::event::PopulatedEvent;
use super::validators::{purchase_date, required, validate_object, Checked};
use crate::utils::error::AppError;

pub const MAX_SEAT_NUMBER: i32 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub buyer_name: String,
    pub seat_number: i32,
    pub checked_in: bool,
    pub purchase_date: DateTime<Utc>,
    pub notes: Vec<String>,
    pub payload: Value,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ticket with its event, and that event's organizer, resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedTicket {
    pub id: Uuid,
    pub buyer_name: String,
    pub seat_number: i32,
    pub checked_in: bool,
    pub purchase_date: DateTime<Utc>,
    pub notes: Vec<String>,
    pub payload: Value,
    #[serde(rename = "eventId")]
    pub event: Option<PopulatedEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn populate(self, event: Option<PopulatedEvent>) -> PopulatedTicket {
        PopulatedTicket {
            id: self.id,
            buyer_name: self.buyer_name,
            seat_number: self.seat_number,
            checked_in: self.checked_in,
            purchase_date: self.purchase_date,
            notes: self.notes,
            payload: self.payload,
            event,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub buyer_name: Option<String>,
    pub seat_number: Option<i32>,
    pub checked_in: Option<bool>,
    #[serde(default, deserialize_with = "purchase_date")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub notes: Option<Vec<String>>,
    pub payload: Option<Value>,
    pub event_id: Option<Uuid>,
}

fn validate_payload(payload: &Value) -> Result<(), ValidationError> {
    validate_object(payload).map_err(|mut err| {
        err.message = Some(Cow::Borrowed("payload must be an object"));
        err
    })
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct TicketDraft {
    #[validate(length(min = 1, message = "buyerName is required"))]
    pub buyer_name: String,
    #[validate(range(max = 100000, message = "seatNumber must not exceed 100000"))]
    pub seat_number: i32,
    pub checked_in: bool,
    pub purchase_date: DateTime<Utc>,
    pub notes: Vec<String>,
    #[validate(custom(function = "validate_payload"))]
    pub payload: Value,
    pub event_id: Uuid,
}

impl Checked for TicketDraft {
    const FIELD_ORDER: &'static [&'static str] = &[
        "buyer_name",
        "seat_number",
        "checked_in",
        "purchase_date",
        "notes",
        "payload",
        "event_id",
    ];
}

impl TicketPayload {
    pub fn into_draft(self) -> Result<TicketDraft, AppError> {
        let buyer_name = required(self.buyer_name, "buyerName")?;
        let seat_number = required(self.seat_number, "seatNumber")?;
        let event_id = required(self.event_id, "eventId")?;

        let draft = TicketDraft {
            buyer_name: buyer_name.trim().to_string(),
            seat_number,
            checked_in: self.checked_in.unwrap_or(false),
            purchase_date: self.purchase_date.unwrap_or_else(Utc::now),
            notes: self.notes.unwrap_or_default(),
            payload: self
                .payload
                .unwrap_or_else(|| Value::Object(Default::default())),
            event_id,
        };
        draft.check()?;
        Ok(draft)
    }

    pub fn merge_into(self, current: &Ticket) -> Result<TicketDraft, AppError> {
        let draft = TicketDraft {
            buyer_name: self
                .buyer_name
                .unwrap_or_else(|| current.buyer_name.clone())
                .trim()
                .to_string(),
            seat_number: self.seat_number.unwrap_or(current.seat_number),
            checked_in: self.checked_in.unwrap_or(current.checked_in),
            purchase_date: self.purchase_date.unwrap_or(current.purchase_date),
            notes: self.notes.unwrap_or_else(|| current.notes.clone()),
            payload: self.payload.unwrap_or_else(|| current.payload.clone()),
            event_id: self.event_id.unwrap_or(current.event_id),
        };
        draft.check()?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> TicketPayload {
        TicketPayload {
            buyer_name: Some("  Carole ".into()),
            seat_number: Some(12),
            notes: Some(vec!["VIP".into()]),
            payload: Some(json!({ "source": "flutter" })),
            event_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_and_trimming() {
        let before = Utc::now();
        let draft = payload().into_draft().unwrap();
        assert_eq!(draft.buyer_name, "Carole");
        assert!(!draft.checked_in);
        assert!(draft.purchase_date >= before);
    }

    #[test]
    fn test_seat_number_limit() {
        let ok = TicketPayload {
            seat_number: Some(MAX_SEAT_NUMBER),
            ..payload()
        };
        assert!(ok.into_draft().is_ok());

        let err = TicketPayload {
            seat_number: Some(MAX_SEAT_NUMBER + 1),
            ..payload()
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: seatNumber must not exceed 100000"
        );
    }

    #[test]
    fn test_blank_buyer_name_is_rejected() {
        let err = TicketPayload {
            buyer_name: Some("   ".into()),
            ..payload()
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: buyerName is required");
    }

    #[test]
    fn test_missing_event_id_is_rejected() {
        let err = TicketPayload {
            event_id: None,
            ..payload()
        }
        .into_draft()
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: eventId is required");
    }

    #[test]
    fn test_merge_revalidates() {
        let now = Utc::now();
        let current = Ticket {
            id: Uuid::new_v4(),
            buyer_name: "Carole".into(),
            seat_number: 12,
            checked_in: false,
            purchase_date: now,
            notes: vec![],
            payload: json!({}),
            event_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };

        let checked_in = TicketPayload {
            checked_in: Some(true),
            ..Default::default()
        }
        .merge_into(&current)
        .unwrap();
        assert!(checked_in.checked_in);
        assert_eq!(checked_in.seat_number, 12);

        let err = TicketPayload {
            seat_number: Some(100_001),
            ..Default::default()
        }
        .merge_into(&current)
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
