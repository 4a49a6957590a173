//! Admin operations over job postings.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPayload, JobPosting};
use crate::store::JobRepository;

pub async fn list(jobs: &dyn JobRepository) -> Result<Vec<JobPosting>, AppError> {
    Ok(jobs.list_all().await?)
}

pub async fn get(jobs: &dyn JobRepository, id: Uuid) -> Result<JobPosting, AppError> {
    jobs.find(id).await?.ok_or_else(|| not_found(id))
}

pub async fn create(jobs: &dyn JobRepository, payload: JobPayload) -> Result<JobPosting, AppError> {
    let input = payload.validate()?;
    Ok(jobs.insert(input).await?)
}

/// Replaces every editable field of the posting.
pub async fn update(
    jobs: &dyn JobRepository,
    id: Uuid,
    payload: JobPayload,
) -> Result<JobPosting, AppError> {
    let input = payload.validate()?;
    jobs.update(id, input).await?.ok_or_else(|| not_found(id))
}

pub async fn delete(jobs: &dyn JobRepository, id: Uuid) -> Result<(), AppError> {
    if !jobs.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job {id} not found"))
}
