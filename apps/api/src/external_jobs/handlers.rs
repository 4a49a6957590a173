use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::external_jobs::ExternalJob;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExternalJobsQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExternalJobsResponse {
    pub jobs: Vec<ExternalJob>,
}

/// GET /api/external-jobs?search=
pub async fn handle_external_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ExternalJobsQuery>,
) -> Result<Json<ExternalJobsResponse>, AppError> {
    let jobs = state.external_jobs.search(params.search.as_deref()).await?;
    Ok(Json(ExternalJobsResponse { jobs }))
}
