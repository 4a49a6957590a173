use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::jobs::service;
use crate::models::job::{JobPayload, JobPosting};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: JobPosting,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = service::list(state.jobs.as_ref()).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<JobPayload>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let job = service::create(state.jobs.as_ref(), payload).await?;
    info!("Admin {} created job {}", admin.user_id, job.id);
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let job = service::get(state.jobs.as_ref(), id).await?;
    Ok(Json(JobResponse { job }))
}

/// PUT /api/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPayload>,
) -> Result<Json<JobResponse>, AppError> {
    let job = service::update(state.jobs.as_ref(), id, payload).await?;
    info!("Admin {} updated job {id}", admin.user_id);
    Ok(Json(JobResponse { job }))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::delete(state.jobs.as_ref(), id).await?;
    info!("Admin {} deleted job {id}", admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}
