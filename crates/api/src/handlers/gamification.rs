//! Handlers for `/gamification`: progress stats and achievement status.
//!
//! Both endpoints are read-only views; achievements are evaluated on the fly
//! against the catalog held in [`AppState`].

use axum::extract::State;
use axum::Json;
use planit_core::achievements::{earned_count, evaluate, AchievementStatus};
use planit_core::gamification::{level_progress_percent, UserProgress};
use planit_db::repositories::UserStatsRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Progress plus derived figures for `GET /gamification/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub progress: UserProgress,
    /// Number of catalog achievements currently earned.
    pub achievements_count: usize,
    /// Percent of the way to the next level.
    pub level_progress: i32,
}

/// GET /api/v1/gamification/stats
///
/// A user with no recorded events gets the zero state.
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let progress = UserStatsRepo::progress_for_user(&state.pool, auth.user_id).await?;
    let statuses = evaluate(&progress, &state.catalog);

    let stats = StatsResponse {
        achievements_count: earned_count(&statuses),
        level_progress: level_progress_percent(progress.total_points),
        progress,
    };
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/gamification/achievements
///
/// Every catalog entry with earned flag and progress percentage, ordered by
/// threshold.
pub async fn get_achievements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<AchievementStatus>>>> {
    let progress = UserStatsRepo::progress_for_user(&state.pool, auth.user_id).await?;
    let statuses = evaluate(&progress, &state.catalog);
    Ok(Json(DataResponse { data: statuses }))
}
