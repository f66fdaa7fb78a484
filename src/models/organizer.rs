use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::validators::{normalize_optional, required, Checked, EMAIL_REGEX};
use crate::utils::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update. On update, absent fields keep their
/// stored value; an explicit `null` clears `phone` or `email`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerPayload {
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
}

/// Normalized, validated organizer fields ready to be written.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct OrganizerDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email format"))]
    pub email: Option<String>,
}

impl Checked for OrganizerDraft {
    const FIELD_ORDER: &'static [&'static str] = &["name", "phone", "email"];
}

impl OrganizerDraft {
    fn normalized(name: String, phone: Option<String>, email: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: normalize_optional(phone),
            email: normalize_optional(email).map(|e| e.to_lowercase()),
        }
    }
}

impl OrganizerPayload {
    pub fn into_draft(self) -> Result<OrganizerDraft, AppError> {
        let name = required(self.name, "name")?;
        let draft = OrganizerDraft::normalized(name, self.phone.flatten(), self.email.flatten());
        draft.check()?;
        Ok(draft)
    }

    pub fn merge_into(self, current: &Organizer) -> Result<OrganizerDraft, AppError> {
        let draft = OrganizerDraft::normalized(
            self.name.unwrap_or_else(|| current.name.clone()),
            self.phone.unwrap_or_else(|| current.phone.clone()),
            self.email.unwrap_or_else(|| current.email.clone()),
        );
        draft.check()?;
        Ok(draft)
    }
}
