use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::organizer::Organizer;
use super::validators::{required, start_date, validate_object, Checked};
use crate::utils::error::AppError;

pub const MAX_ATTENDEES: i32 = 50_000;
pub const MAX_PRICE: i64 = 100_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_category", rename_all = "lowercase")]
pub enum Category {
    Music,
    Sports,
    Tech,
    Art,
    Business,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Music,
        Category::Sports,
        Category::Tech,
        Category::Art,
        Category::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Sports => "sports",
            Category::Tech => "tech",
            Category::Art => "art",
            Category::Business => "business",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                AppError::validation(
                    "category must be one of: music, sports, tech, art, business",
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub max_attendees: i32,
    pub start_date: DateTime<Utc>,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub extra: Value,
    pub organizer_id: Uuid,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event with its organizer reference resolved. A dangling reference
/// resolves to `null` rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedEvent {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub max_attendees: i32,
    pub start_date: DateTime<Utc>,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub extra: Value,
    #[serde(rename = "organizerId")]
    pub organizer: Option<Organizer>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn populate(self, organizer: Option<Organizer>) -> PopulatedEvent {
        PopulatedEvent {
            id: self.id,
            title: self.title,
            category: self.category,
            max_attendees: self.max_attendees,
            start_date: self.start_date,
            is_public: self.is_public,
            tags: self.tags,
            extra: self.extra,
            organizer,
            price: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: Option<String>,
    pub category: Option<String>,
    pub max_attendees: Option<i32>,
    #[serde(default, deserialize_with = "start_date")]
    pub start_date: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub extra: Option<Value>,
    pub organizer_id: Option<Uuid>,
    pub price: Option<Decimal>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price >= Decimal::ZERO && *price <= Decimal::from(MAX_PRICE) {
        return Ok(());
    }
    let mut err = ValidationError::new("range");
    err.message = Some(Cow::Borrowed("price must be between 0 and 100000"));
    Err(err)
}

fn validate_extra(extra: &Value) -> Result<(), ValidationError> {
    validate_object(extra).map_err(|mut err| {
        err.message = Some(Cow::Borrowed("extra must be an object"));
        err
    })
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub category: Category,
    #[validate(range(max = 50000, message = "maxAttendees must not exceed 50000"))]
    pub max_attendees: i32,
    pub start_date: DateTime<Utc>,
    pub is_public: bool,
    pub tags: Vec<String>,
    #[validate(custom(function = "validate_extra"))]
    pub extra: Value,
    pub organizer_id: Uuid,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

impl Checked for EventDraft {
    const FIELD_ORDER: &'static [&'static str] = &[
        "title",
        "category",
        "max_attendees",
        "start_date",
        "is_public",
        "tags",
        "extra",
        "organizer_id",
        "price",
    ];
}

impl EventPayload {
    /// Presence and enumeration checks run first in field order, then the
    /// value constraints.
    pub fn into_draft(self) -> Result<EventDraft, AppError> {
        let title = required(self.title, "title")?;
        let category = required(self.category, "category")?.parse()?;
        let max_attendees = required(self.max_attendees, "maxAttendees")?;
        let start_date = required(self.start_date, "startDate")?;
        let organizer_id = required(self.organizer_id, "organizerId")?;
        let price = required(self.price, "price")?;

        let draft = EventDraft {
            title: title.trim().to_lowercase(),
            category,
            max_attendees,
            start_date,
            is_public: self.is_public.unwrap_or(true),
            tags: self.tags.unwrap_or_default(),
            extra: self.extra.unwrap_or_else(|| Value::Object(Default::default())),
            organizer_id,
            price,
        };
        draft.check()?;
        Ok(draft)
    }

    pub fn merge_into(self, current: &Event) -> Result<EventDraft, AppError> {
        let category = match self.category {
            Some(raw) => raw.parse()?,
            None => current.category,
        };

        let draft = EventDraft {
            title: self
                .title
                .unwrap_or_else(|| current.title.clone())
                .trim()
                .to_lowercase(),
            category,
            max_attendees: self.max_attendees.unwrap_or(current.max_attendees),
            start_date: self.start_date.unwrap_or(current.start_date),
            is_public: self.is_public.unwrap_or(current.is_public),
            tags: self.tags.unwrap_or_else(|| current.tags.clone()),
            extra: self.extra.unwrap_or_else(|| current.extra.clone()),
            organizer_id: self.organizer_id.unwrap_or(current.organizer_id),
            price: self.price.unwrap_or(current.price),
        };
        draft.check()?;
        Ok(draft)
    }
}

/// Constraints for listing events. Absent keys are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| event.category.as_str() == c);
        let visibility_ok = self.is_public.map_or(true, |p| event.is_public == p);
        category_ok && visibility_ok
    }
}

/// Raw query string for event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub category: Option<String>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<String>,
}

impl From<EventQuery> for EventFilter {
    /// `isPublic` is true only for the literal `"true"`; an empty category
    /// does not constrain.
    fn from(query: EventQuery) -> Self {
        Self {
            category: query.category.filter(|c| !c.is_empty()),
            is_public: query.is_public.map(|v| v == "true"),
        }
    }
}
