use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::ApplicationRecord;
use crate::store::{ApplicationRepository, JobRepository, UserRepository};

/// Records `user_id`'s application to `job_id`.
///
/// The user and job must exist and the job must be active. A second
/// application to the same job is a `Conflict`; the unique index on
/// (user_id, job_id) backs the pre-check when two requests race.
pub async fn apply(
    users: &dyn UserRepository,
    jobs: &dyn JobRepository,
    applications: &dyn ApplicationRepository,
    user_id: Uuid,
    job_id: Uuid,
) -> Result<ApplicationRecord, AppError> {
    if users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    let job = jobs
        .find(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    if !job.is_active {
        return Err(AppError::Validation(
            "This job is no longer accepting applications".to_string(),
        ));
    }

    if applications.exists(user_id, job_id).await? {
        return Err(AppError::Conflict(
            "You have already applied to this job".to_string(),
        ));
    }

    let record = applications.insert(user_id, job_id).await?;
    info!("User {user_id} applied to job {job_id}");
    Ok(record)
}

pub async fn list_for_user(
    applications: &dyn ApplicationRepository,
    user_id: Uuid,
) -> Result<Vec<ApplicationRecord>, AppError> {
    Ok(applications.list_for_user(user_id).await?)
}
