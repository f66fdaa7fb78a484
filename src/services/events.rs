use tracing::{info, warn};
use uuid::Uuid;

use super::{populate_event, populate_events};
use crate::models::{EventFilter, EventPayload, PopulatedEvent};
use crate::store::Repository;
use crate::utils::error::AppError;

const RESOURCE: &str = "Event";

/// The organizer reference is not enforced; an event pointing at a missing
/// organizer is stored and reads back with a `null` organizer.
pub async fn create(repo: &dyn Repository, payload: EventPayload) -> Result<PopulatedEvent, AppError> {
    let draft = payload.into_draft()?;
    if repo.find_organizer(draft.organizer_id).await?.is_none() {
        warn!(organizer_id = %draft.organizer_id, "Creating event for unknown organizer");
    }
    let event = repo.insert_event(draft).await?;
    info!(event_id = %event.id, category = %event.category, "Event created");
    populate_event(repo, event).await
}

pub async fn list(repo: &dyn Repository, filter: &EventFilter) -> Result<Vec<PopulatedEvent>, AppError> {
    let events = repo.list_events(filter).await?;
    populate_events(repo, events).await
}

pub async fn get(repo: &dyn Repository, id: Uuid) -> Result<PopulatedEvent, AppError> {
    let event = repo
        .find_event(id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    populate_event(repo, event).await
}

pub async fn update(
    repo: &dyn Repository,
    id: Uuid,
    payload: EventPayload,
) -> Result<PopulatedEvent, AppError> {
    let current = repo
        .find_event(id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    let draft = payload.merge_into(&current)?;
    if draft.organizer_id != current.organizer_id
        && repo.find_organizer(draft.organizer_id).await?.is_none()
    {
        warn!(event_id = %id, organizer_id = %draft.organizer_id, "Moving event to unknown organizer");
    }
    let event = repo
        .update_event(id, draft)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    info!(event_id = %event.id, "Event updated");
    populate_event(repo, event).await
}

/// Tickets that reference the event are left untouched.
pub async fn delete(repo: &dyn Repository, id: Uuid) -> Result<(), AppError> {
    if !repo.delete_event(id).await? {
        return Err(AppError::not_found(RESOURCE));
    }
    info!(event_id = %id, "Event deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::models::{Category, OrganizerPayload};
    use crate::services::organizers;
    use crate::store::{EventRepository, MemoryStore};

    async fn organizer(repo: &MemoryStore) -> Uuid {
        organizers::create(
            repo,
            OrganizerPayload {
                name: Some("centralweb".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
    }

    fn payload(organizer_id: Uuid) -> EventPayload {
        EventPayload {
            title: Some("Billie Eilish Concert".into()),
            category: Some("music".into()),
            max_attendees: Some(20_000),
            start_date: Some(Utc.with_ymd_and_hms(2026, 1, 20, 18, 0, 0).unwrap()),
            is_public: Some(true),
            tags: Some(vec!["concert".into()]),
            extra: Some(json!({ "location": "Beirut" })),
            organizer_id: Some(organizer_id),
            price: Some(Decimal::from(100)),
        }
    }

    #[tokio::test]
    async fn test_create_lowercases_title_and_populates_organizer() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;

        let created = create(&repo, payload(org_id)).await.unwrap();
        assert_eq!(created.title, "billie eilish concert");
        assert_eq!(created.organizer.as_ref().map(|o| o.id), Some(org_id));

        let read = get(&repo, created.id).await.unwrap();
        assert_eq!(read.title, "billie eilish concert");
        assert_eq!(read.organizer.map(|o| o.name), Some("centralweb".into()));
    }

    #[tokio::test]
    async fn test_invalid_events_are_not_persisted() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;

        let invalid = [
            EventPayload {
                category: Some("opera".into()),
                ..payload(org_id)
            },
            EventPayload {
                max_attendees: Some(50_001),
                ..payload(org_id)
            },
            EventPayload {
                price: Some(Decimal::from(-1)),
                ..payload(org_id)
            },
            EventPayload {
                price: Some(Decimal::from(100_001)),
                ..payload(org_id)
            },
        ];

        for p in invalid {
            let err = create(&repo, p).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
        assert!(list(&repo, &EventFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_organizer_leaves_event_with_null_organizer() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;
        let event = create(&repo, payload(org_id)).await.unwrap();

        organizers::delete(&repo, org_id).await.unwrap();

        let read = get(&repo, event.id).await.unwrap();
        assert_eq!(read.id, event.id);
        assert!(read.organizer.is_none());
    }

    #[tokio::test]
    async fn test_event_for_unknown_organizer_is_accepted() {
        let repo = MemoryStore::new();
        let created = create(&repo, payload(Uuid::new_v4())).await.unwrap();
        assert!(created.organizer.is_none());
    }

    #[tokio::test]
    async fn test_filter_public_music_sorted_by_start_date() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;

        let specs = [
            ("music", true, 20),
            ("music", false, 10),
            ("tech", true, 5),
            ("music", true, 2),
        ];
        for (category, is_public, day) in specs {
            create(
                &repo,
                EventPayload {
                    category: Some(category.into()),
                    is_public: Some(is_public),
                    start_date: Some(Utc.with_ymd_and_hms(2026, 4, day, 9, 0, 0).unwrap()),
                    ..payload(org_id)
                },
            )
            .await
            .unwrap();
        }

        let filter = EventFilter {
            category: Some("music".into()),
            is_public: Some(true),
        };
        let events = list(&repo, &filter).await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| e.category == Category::Music && e.is_public));
        assert!(events[0].start_date < events[1].start_date);
        assert!(events.iter().all(|e| e.organizer.is_some()));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_unchanged() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;
        let event = create(&repo, payload(org_id)).await.unwrap();

        let err = update(
            &repo,
            event.id,
            EventPayload {
                category: Some("cooking".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(get(&repo, event.id).await.unwrap(), event);

        let updated = update(
            &repo,
            event.id,
            EventPayload {
                title: Some("Billie Eilish Encore".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "billie eilish encore");
        assert_eq!(updated.price, event.price);
    }

    #[tokio::test]
    async fn test_update_to_unknown_organizer_is_accepted() {
        let repo = MemoryStore::new();
        let org_id = organizer(&repo).await;
        let event = create(&repo, payload(org_id)).await.unwrap();

        let stray = Uuid::new_v4();
        let updated = update(
            &repo,
            event.id,
            EventPayload {
                organizer_id: Some(stray),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.organizer.is_none());
        assert_eq!(repo.find_event(event.id).await.unwrap().map(|e| e.organizer_id), Some(stray));
    }
}
