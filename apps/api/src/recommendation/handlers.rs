use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::recommendation::scorer::ScoredRecommendation;
use crate::recommendation::service::recommend;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredRecommendation>,
}

/// GET /api/recommend
///
/// Ranks every active job for the caller. Computed per request; nothing is cached.
pub async fn handle_recommend(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<RecommendResponse>, AppError> {
    let recommendations =
        recommend(state.users.as_ref(), state.jobs.as_ref(), user.user_id).await?;
    Ok(Json(RecommendResponse { recommendations }))
}
