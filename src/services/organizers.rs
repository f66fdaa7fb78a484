use tracing::info;
use uuid::Uuid;

use crate::models::{Organizer, OrganizerPayload};
use crate::store::Repository;
use crate::utils::error::AppError;

const RESOURCE: &str = "Organizer";

pub async fn create(repo: &dyn Repository, payload: OrganizerPayload) -> Result<Organizer, AppError> {
    let draft = payload.into_draft()?;
    let organizer = repo.insert_organizer(draft).await?;
    info!(organizer_id = %organizer.id, "Organizer created");
    Ok(organizer)
}

pub async fn list(repo: &dyn Repository) -> Result<Vec<Organizer>, AppError> {
    repo.list_organizers().await
}

pub async fn get(repo: &dyn Repository, id: Uuid) -> Result<Organizer, AppError> {
    repo.find_organizer(id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))
}

pub async fn update(
    repo: &dyn Repository,
    id: Uuid,
    payload: OrganizerPayload,
) -> Result<Organizer, AppError> {
    let current = get(repo, id).await?;
    let draft = payload.merge_into(&current)?;
    let organizer = repo
        .update_organizer(id, draft)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE))?;
    info!(organizer_id = %organizer.id, "Organizer updated");
    Ok(organizer)
}

/// Events that reference the organizer are left untouched.
pub async fn delete(repo: &dyn Repository, id: Uuid) -> Result<(), AppError> {
    if !repo.delete_organizer(id).await? {
        return Err(AppError::not_found(RESOURCE));
    }
    info!(organizer_id = %id, "Organizer deleted");
    Ok(())
}
