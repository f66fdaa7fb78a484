use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::utils::error::AppError;

pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Validation with a deterministic "first violated constraint".
///
/// `validator` collects every failure into a map; callers only ever see the
/// first one in `FIELD_ORDER`.
pub trait Checked: Validate {
    const FIELD_ORDER: &'static [&'static str];

    fn check(&self) -> Result<(), AppError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let fields = errors.field_errors();
        let first = Self::FIELD_ORDER.iter().find_map(|field| {
            fields
                .get(*field)
                .and_then(|errs| errs.first())
                .map(|err| (*field, err))
        });

        let message = match first {
            Some((field, err)) => err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid")),
            None => errors.to_string(),
        };

        Err(AppError::ValidationError(message))
    }
}

/// Presence check for required payload fields.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::validation(format!("{field} is required")))
}

pub fn validate_object(value: &Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("object"))
    }
}

/// Trims, and maps blank strings to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) or a bare
/// calendar date (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D, field: &str) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("{field} must be a valid date"))),
    }
}

pub fn start_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_date(deserializer, "startDate")
}

pub fn purchase_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_date(deserializer, "purchaseDate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_REGEX.is_match("info@centralweb.test"));
        assert!(!EMAIL_REGEX.is_match("info@centralweb"));
        assert!(!EMAIL_REGEX.is_match("in fo@centralweb.test"));
        assert!(!EMAIL_REGEX.is_match("@centralweb.test"));
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 20, 18, 0, 0).unwrap();
        assert_eq!(parse_datetime("2026-01-20T18:00:00Z"), Some(expected));
        assert_eq!(parse_datetime("2026-01-20T20:00:00+02:00"), Some(expected));
        assert_eq!(parse_datetime("2026-01-20T18:00:00"), Some(expected));
        assert_eq!(
            parse_datetime("2026-01-20"),
            Some(Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_datetime("2026-02-30"), None);
        assert_eq!(parse_datetime("next tuesday"), None);
    }

    #[test]
    fn test_normalize_optional_drops_blank() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" +961 ".into())), Some("+961".into()));
        assert_eq!(normalize_optional(None), None);
    }
}
