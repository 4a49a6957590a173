use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::recommendation::scorer::{score, ScoredRecommendation};
use crate::store::{JobRepository, UserRepository};

/// Scores every active job for `user_id`, best first.
///
/// Ties are broken by job id so repeated calls over the same data return the
/// same order.
pub async fn recommend(
    users: &dyn UserRepository,
    jobs: &dyn JobRepository,
    user_id: Uuid,
) -> Result<Vec<ScoredRecommendation>, AppError> {
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    let profile = user.profile();

    let active = jobs.list_active().await?;

    let mut ranked: Vec<ScoredRecommendation> =
        active.iter().map(|job| score(&profile, job)).collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.job.id.cmp(&b.job.id))
    });

    debug!(
        "Ranked {} active jobs for user {user_id}",
        ranked.len()
    );
    Ok(ranked)
}
