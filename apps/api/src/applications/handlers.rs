use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applications::service;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::ApplicationRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub application: ApplicationRecord,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<ApplicationRecord>,
}

/// POST /api/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, AppError> {
    let raw = request
        .job_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("jobId is required".to_string()))?;
    let job_id = Uuid::parse_str(&raw)
        .map_err(|_| AppError::Validation(format!("jobId '{raw}' is not a valid id")))?;

    let application = service::apply(
        state.users.as_ref(),
        state.jobs.as_ref(),
        state.applications.as_ref(),
        user.user_id,
        job_id,
    )
    .await?;

    Ok(Json(ApplyResponse {
        message: "Application submitted successfully.".to_string(),
        application,
    }))
}

/// GET /api/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let applications = service::list_for_user(state.applications.as_ref(), user.user_id).await?;
    Ok(Json(ApplicationListResponse { applications }))
}
